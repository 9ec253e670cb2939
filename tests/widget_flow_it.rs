// std
use std::{
	sync::atomic::{AtomicU32, Ordering},
	time::Duration,
};
// self
use auth_picker::{
	_preludet::*,
	config::{WidgetConfig, WorkspaceId},
	region::Region,
	widget::{AuthWidget, LoadState},
};

#[tokio::test]
async fn eu_region_requests_the_eu_base_with_the_workspace_interpolated() {
	let config = WidgetConfig::builder(
		WorkspaceId::new("workspace-123").expect("Workspace fixture should be valid."),
	)
	.region(Region::Eu)
	.build()
	.expect("EU configuration should build successfully.");
	let (widget, client, _) = scripted_widget(config, "https://app.example.com/");

	client.push_json(r#"{"providers":[]}"#);
	widget.refresh().await;

	let requests = client.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(
		requests[0].as_str(),
		"https://eu.unified.to/unified/integration/workspace/workspace-123?categories=auth&summary=true&active=true"
	);
}

#[tokio::test]
async fn transport_error_text_reaches_the_recorded_message() {
	let failures = Arc::new(AtomicU32::new(0));
	let client = Arc::new(ScriptedHttpClient::default());
	let hook_failures = failures.clone();
	let widget = AuthWidget::builder(test_config())
		.http_client::<ScriptedHttpClient>(client.clone())
		.location(test_location("https://app.example.com/"))
		.navigator(RecordingNavigator::default())
		.on_failure(move |_| {
			hook_failures.fetch_add(1, Ordering::SeqCst);
		})
		.build()
		.expect("Test widget should build successfully.");

	client.push_transport_error("connection refused");
	widget.refresh().await;

	let LoadState::Failed { message } = widget.state() else {
		panic!("Transport failure should reach the failed state.");
	};

	assert!(
		message.contains("connection refused"),
		"Message should carry the underlying error text: {message}"
	);
	assert_eq!(failures.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn superseded_discovery_cycle_never_clobbers_the_newer_one() {
	let gate = Arc::new(AsyncMutex::new(()));
	let scripted = Arc::new(ScriptedHttpClient::default());
	let failures = Arc::new(AtomicU32::new(0));
	let hook_failures = failures.clone();
	let widget = Arc::new(
		AuthWidget::builder(test_config())
			.http_client(GatedHttpClient::new(gate.clone(), scripted.clone()))
			.location(test_location("https://app.example.com/"))
			.navigator(RecordingNavigator::default())
			.on_failure(move |_| {
				hook_failures.fetch_add(1, Ordering::SeqCst);
			})
			.build()
			.expect("Test widget should build successfully."),
	);

	// First cycle will fail once released; the superseding one succeeds.
	scripted.push_status(500);
	scripted.push_json(r#"{"providers":[{"id":"okta","name":"Okta"}]}"#);

	let held = gate.lock().await;
	let stale = tokio::spawn({
		let widget = widget.clone();

		async move { widget.refresh().await }
	});

	// Let the stale cycle claim the serialization guard before superseding it.
	tokio::time::sleep(Duration::from_millis(50)).await;

	let superseding = tokio::spawn({
		let widget = widget.clone();

		async move {
			widget
				.retarget(
					WorkspaceId::new("workspace-456")
						.expect("Workspace fixture should be valid."),
					Region::Us,
				)
				.await
				.expect("Retarget should succeed.");
		}
	});

	tokio::time::sleep(Duration::from_millis(50)).await;
	drop(held);

	stale.await.expect("Stale cycle task should complete.");
	superseding.await.expect("Superseding cycle task should complete.");

	let providers = widget.state().providers().expect("Newer cycle should win.").to_vec();

	assert_eq!(providers.len(), 1);
	assert_eq!(providers[0].id.as_ref(), "okta");
	assert_eq!(failures.load(Ordering::SeqCst), 0, "Stale failure must not invoke the hook.");
	assert_eq!(widget.discovery_metrics().attempts(), 2);
	assert_eq!(widget.discovery_metrics().successes(), 1);
	assert_eq!(widget.discovery_metrics().failures(), 0);
}

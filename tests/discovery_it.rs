#![cfg(feature = "reqwest")]

// std
use std::sync::atomic::{AtomicU32, Ordering};
// crates.io
use httpmock::prelude::*;
// self
use auth_picker::{
	_preludet::*,
	http::ReqwestHttpClient,
	region::Endpoints,
	widget::{AuthWidget, LoadState},
};

fn server_endpoints(server: &MockServer) -> Endpoints {
	let base = Url::parse(&server.url("/")).expect("Mock server base should parse successfully.");

	Endpoints::custom(base).expect("Mock server base should be accepted.")
}

fn reqwest_widget(server: &MockServer, failures: Arc<AtomicU32>) -> AuthWidget {
	let hook_failures = failures.clone();

	AuthWidget::builder(test_config())
		.http_client(ReqwestHttpClient::default())
		.endpoints(server_endpoints(server))
		.location(test_location("https://app.example.com/signin"))
		.navigator(RecordingNavigator::default())
		.on_failure(move |_| {
			hook_failures.fetch_add(1, Ordering::SeqCst);
		})
		.build()
		.expect("Reqwest-backed widget should build successfully.")
}

#[tokio::test]
async fn discovery_hits_the_expected_endpoint_and_reaches_ready() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/unified/integration/workspace/workspace-123")
				.query_param("categories", "auth")
				.query_param("summary", "true")
				.query_param("active", "true");
			then.status(200).header("content-type", "application/json").body(
				"{\"providers\":[{\"id\":\"google\",\"name\":\"Google\"},{\"id\":\"github\",\"name\":\"GitHub\"}]}",
			);
		})
		.await;
	let failures = Arc::new(AtomicU32::new(0));
	let widget = reqwest_widget(&server, failures.clone());

	widget.mount().await;

	mock.assert_async().await;

	let providers = widget.state().providers().expect("Discovery should reach ready.").to_vec();

	assert_eq!(providers.len(), 2);
	assert_eq!(providers[0].id.as_ref(), "google");
	assert_eq!(providers[1].id.as_ref(), "github");
	assert_eq!(failures.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_success_status_fails_with_one_hook_invocation() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/unified/integration/workspace/workspace-123");
			then.status(503);
		})
		.await;
	let failures = Arc::new(AtomicU32::new(0));
	let widget = reqwest_widget(&server, failures.clone());

	widget.refresh().await;

	mock.assert_async().await;

	let LoadState::Failed { message } = widget.state() else {
		panic!("Non-success status should reach the failed state.");
	};

	assert!(message.contains("503"), "Message should carry the status: {message}");
	assert_eq!(failures.load(Ordering::SeqCst), 1);
	assert_eq!(widget.discovery_metrics().failures(), 1);
}

#[tokio::test]
async fn malformed_body_fails_with_a_parse_message() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/unified/integration/workspace/workspace-123");
			then.status(200).header("content-type", "application/json").body("not json at all");
		})
		.await;
	let failures = Arc::new(AtomicU32::new(0));
	let widget = reqwest_widget(&server, failures.clone());

	widget.refresh().await;

	mock.assert_async().await;

	let LoadState::Failed { message } = widget.state() else {
		panic!("Malformed body should reach the failed state.");
	};

	assert!(message.contains("malformed JSON"), "Message should name the parse failure: {message}");
	assert_eq!(failures.load(Ordering::SeqCst), 1);
}

//! In-process S3 stand-in covering the calls the drop zone client makes

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};

const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// A request received by the fake server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub bucket: String,
    pub key: Option<String>,
    pub query: Vec<String>,
}

impl RecordedRequest {
    pub fn has_query(&self, name: &str) -> bool {
        self.query.iter().any(|q| q == name)
    }
}

/// Calls whose answer can be replaced by an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOperation {
    GetBucketLocation,
    HeadObject,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBucket {
    pub region: String,
    pub objects: BTreeMap<String, u64>,
    pub public_access_blocked: bool,
    pub versioning_enabled: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    buckets: HashMap<String, FakeBucket>,
    requests: Vec<RecordedRequest>,
    create_failure: Option<(StatusCode, String)>,
    failures: HashMap<FakeOperation, (StatusCode, String)>,
}

/// Handle to a running fake S3 server
#[derive(Debug, Clone, Default)]
pub struct FakeS3 {
    state: Arc<Mutex<FakeState>>,
    endpoint_url: String,
}

impl FakeS3 {
    /// Starts the server on an ephemeral local port
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake S3 listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let fake = Self {
            state: Arc::default(),
            endpoint_url: format!("http://{addr}"),
        };

        let router = Router::new().fallback(handle).with_state(fake.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        fake
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds an existing bucket living in `region`
    pub fn add_bucket(&self, name: &str, region: &str) {
        self.lock().buckets.insert(
            name.to_string(),
            FakeBucket {
                region: region.to_string(),
                ..FakeBucket::default()
            },
        );
    }

    /// Seeds an object of `size` bytes
    pub fn add_object(&self, bucket: &str, key: &str, size: u64) {
        if let Some(bucket) = self.lock().buckets.get_mut(bucket) {
            bucket.objects.insert(key.to_string(), size);
        }
    }

    pub fn remove_object(&self, bucket: &str, key: &str) {
        if let Some(bucket) = self.lock().buckets.get_mut(bucket) {
            bucket.objects.remove(key);
        }
    }

    pub fn remove_bucket(&self, name: &str) {
        self.lock().buckets.remove(name);
    }

    /// Makes every following CreateBucket call fail with `code`
    pub fn fail_create_with(&self, status: StatusCode, code: &str) {
        self.lock().create_failure = Some((status, code.to_string()));
    }

    /// Makes every following `operation` fail with `status` and `code`
    pub fn fail_status(&self, operation: FakeOperation, status: StatusCode, code: &str) {
        self.lock()
            .failures
            .insert(operation, (status, code.to_string()));
    }

    pub fn bucket(&self, name: &str) -> Option<FakeBucket> {
        self.lock().buckets.get(name).cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of CreateBucket calls received
    pub fn create_bucket_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == Method::PUT && r.key.is_none() && r.query.is_empty())
            .count()
    }
}

async fn handle(
    State(fake): State<FakeS3>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches('/');
    let (bucket, key) = match path.split_once('/') {
        Some((bucket, key)) if !key.is_empty() => (bucket.to_string(), Some(key.to_string())),
        Some((bucket, _)) => (bucket.to_string(), None),
        None => (path.to_string(), None),
    };
    let query: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').map_or(pair, |(name, _)| name).to_string())
        .filter(|name| name != "x-id")
        .collect();

    let request = RecordedRequest {
        method: method.clone(),
        bucket: bucket.clone(),
        key: key.clone(),
        query,
    };

    let mut state = fake.lock();
    state.requests.push(request.clone());

    match key {
        Some(key) => handle_object(&mut state, &method, &bucket, &key, &headers, &body),
        None => handle_bucket(&mut state, &request, &body),
    }
}

fn handle_bucket(state: &mut FakeState, request: &RecordedRequest, body: &Bytes) -> Response {
    let name = request.bucket.as_str();

    if request.method == Method::PUT && request.query.is_empty() {
        return create_bucket(state, name, body);
    }

    if request.has_query("location") {
        if let Some((status, code)) = state.failures.get(&FakeOperation::GetBucketLocation) {
            return s3_error(*status, code, name);
        }
        let Some(bucket) = state.buckets.get(name) else {
            return s3_error(StatusCode::NOT_FOUND, "NoSuchBucket", name);
        };
        let location = if bucket.region == "us-east-1" {
            ""
        } else {
            bucket.region.as_str()
        };
        return xml(format!(
            r#"<LocationConstraint xmlns="{S3_NAMESPACE}">{location}</LocationConstraint>"#
        ));
    }

    let Some(bucket) = state.buckets.get_mut(name) else {
        return s3_error(StatusCode::NOT_FOUND, "NoSuchBucket", name);
    };

    if request.has_query("publicAccessBlock") {
        bucket.public_access_blocked = true;
        return StatusCode::OK.into_response();
    }

    if request.has_query("versioning") {
        bucket.versioning_enabled = String::from_utf8_lossy(body).contains("Enabled");
        return StatusCode::OK.into_response();
    }

    if request.has_query("list-type") {
        return list_objects(name, bucket);
    }

    s3_error(StatusCode::NOT_IMPLEMENTED, "NotImplemented", name)
}

fn create_bucket(state: &mut FakeState, name: &str, body: &Bytes) -> Response {
    if let Some((status, code)) = &state.create_failure {
        return s3_error(*status, code, name);
    }
    if state.buckets.contains_key(name) {
        return s3_error(StatusCode::CONFLICT, "BucketAlreadyOwnedByYou", name);
    }

    let body = String::from_utf8_lossy(body);
    let region = body
        .split_once("<LocationConstraint>")
        .and_then(|(_, rest)| rest.split_once("</LocationConstraint>"))
        .map_or("us-east-1", |(region, _)| region)
        .to_string();

    state.buckets.insert(
        name.to_string(),
        FakeBucket {
            region,
            ..FakeBucket::default()
        },
    );

    (StatusCode::OK, [(header::LOCATION, format!("/{name}"))]).into_response()
}

fn handle_object(
    state: &mut FakeState,
    method: &Method,
    bucket: &str,
    key: &str,
    headers: &HeaderMap,
    body: &Bytes,
) -> Response {
    if *method == Method::HEAD {
        if let Some((status, _)) = state.failures.get(&FakeOperation::HeadObject) {
            // HEAD responses never carry an error body
            return (*status).into_response();
        }
    }

    let Some(bucket) = state.buckets.get_mut(bucket) else {
        return s3_error(StatusCode::NOT_FOUND, "NoSuchBucket", bucket);
    };

    match *method {
        Method::PUT => {
            // Streaming uploads arrive aws-chunked with the real size in a header
            let size = headers
                .get("x-amz-decoded-content-length")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
                .unwrap_or(body.len() as u64);
            bucket.objects.insert(key.to_string(), size);
            (StatusCode::OK, [(header::ETAG, "\"fake-etag\"")]).into_response()
        }
        Method::HEAD => match bucket.objects.get(key) {
            Some(size) => Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, size.to_string())
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .body(Body::empty())
                .expect("Failed to build HEAD response"),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        _ => s3_error(StatusCode::NOT_IMPLEMENTED, "NotImplemented", key),
    }
}

fn list_objects(name: &str, bucket: &FakeBucket) -> Response {
    let contents: String = bucket
        .objects
        .iter()
        .map(|(key, size)| {
            format!(
                "<Contents><Key>{key}</Key><LastModified>2024-05-01T12:30:00.000Z</LastModified>\
                 <ETag>\"fake-etag\"</ETag><Size>{size}</Size><StorageClass>STANDARD</StorageClass></Contents>"
            )
        })
        .collect();

    xml(format!(
        r#"<ListBucketResult xmlns="{S3_NAMESPACE}"><Name>{name}</Name><Prefix></Prefix><KeyCount>{}</KeyCount><MaxKeys>1000</MaxKeys><IsTruncated>false</IsTruncated>{contents}</ListBucketResult>"#,
        bucket.objects.len()
    ))
}

fn xml(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        format!(r#"<?xml version="1.0" encoding="UTF-8"?>{body}"#),
    )
        .into_response()
}

fn s3_error(status: StatusCode, code: &str, resource: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/xml")],
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Error><Code>{code}</Code><Message>{code}</Message><Resource>{resource}</Resource><RequestId>fake-request</RequestId></Error>"#
        ),
    )
        .into_response()
}

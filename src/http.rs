//! The backend, reached over HTTP.

use crate::{
    collaborators::{ListRefresher, SubmissionOutcome, SubmissionResult, SubmitError, Submitter},
    config::Config,
    field_errors::ErrorMap,
    payload::SubmissionPayload,
    POOL,
};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::AUTHORIZATION,
    StatusCode,
};
use serde_json::Value;
use url::Url;

/// Posts new records and refreshes the catalog list.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    endpoint: Url,
    list_endpoint: Url,
    auth_token: Option<String>,
}

impl HttpCatalog {
    /// # Errors
    /// If the HTTP client can't be built (e.g. no TLS backend).
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("perfume-form/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Uses an already configured client; the timeout in `config` is ignored.
    #[must_use]
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            list_endpoint: config.list_endpoint.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    /// Fetches the list and returns how many entries it has.
    ///
    /// # Errors
    /// If the request fails or the body isn't a JSON array.
    pub fn fetch_list_len(&self) -> Result<usize, reqwest::Error> {
        let list: Vec<Value> = self
            .authorized(self.client.get(self.list_endpoint.clone()))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(list.len())
    }
}

/// Turns the backend's answer into a verdict.
///
/// 2xx is a success. A 400 or 422 carries the field errors as a JSON object. Anything else
/// isn't a verdict on the record.
fn interpret(response: Response) -> SubmissionResult {
    let status = response.status();
    if status.is_success() {
        return Ok(SubmissionOutcome::Success);
    }

    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        let errors: ErrorMap = response.json()?;
        return Ok(SubmissionOutcome::Rejected(errors));
    }

    Err(SubmitError::UnexpectedStatus {
        status: status.as_u16(),
        body: response.text().unwrap_or_default(),
    })
}

impl Submitter for HttpCatalog {
    fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult {
        let form = payload.to_form()?;
        log::debug!("POST {}", self.endpoint);
        let response = self
            .authorized(self.client.post(self.endpoint.clone()))
            .multipart(form)
            .send()?;
        interpret(response)
    }
}

impl ListRefresher for HttpCatalog {
    fn refresh(&mut self) {
        let catalog = self.clone();
        POOL.spawn(move || match catalog.fetch_list_len() {
            Ok(len) => log::info!("Catalog refreshed, {len} perfumes"),
            Err(err) => log::error!("Catalog refresh failed: {err}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Attachment, Field, FormRecord};
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::{TcpListener, TcpStream},
        thread::{self, JoinHandle},
    };

    fn read_request(stream: &mut TcpStream) -> String {
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = None;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse::<usize>().ok();
                }
            }
            let end_of_head = line == "\r\n";
            request.push_str(&line);
            if end_of_head {
                break;
            }
        }

        match content_length {
            Some(len) => {
                let mut body = vec![0; len];
                reader.read_exact(&mut body).unwrap();
                request.push_str(&String::from_utf8_lossy(&body));
            }
            // chunked: read until the terminating zero-length chunk
            None => loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }
                let last = line == "0\r\n";
                request.push_str(&line);
                if last {
                    let mut trailer = String::new();
                    reader.read_line(&mut trailer).unwrap();
                    break;
                }
            },
        }

        request
    }

    /// Answers exactly one request with `status` and a JSON `body`, and hands back the raw
    /// request it received.
    fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (Url::parse(&format!("http://{addr}/api/v1/admin/add")).unwrap(), handle)
    }

    fn catalog(endpoint: Url, token: Option<&str>) -> HttpCatalog {
        let config = Config {
            list_endpoint: endpoint.clone(),
            endpoint,
            auth_token: token.map(str::to_owned),
            ..Config::default()
        };
        let client = Client::builder().no_proxy().build().unwrap();
        HttpCatalog::with_client(client, &config)
    }

    fn payload() -> SubmissionPayload {
        let mut record = FormRecord::new();
        record.set_field(Field::Title, "Bleu");
        record.set_field(Field::Brand, "Chanel");
        record.set_rating(4.5);
        record.set_attachment(Some(Attachment::new("bleu.png", b"png bytes".to_vec())));
        SubmissionPayload::from_record(&record)
    }

    #[test]
    fn success_status_is_success() {
        let (url, server) = serve_once("200 OK", "{}");
        let outcome = catalog(url, Some("token-123")).submit(&payload()).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Success);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/v1/admin/add HTTP/1.1"));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: token-123"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file"; filename="bleu.png""#));
        assert!(request.contains("png bytes"));
        assert!(request.contains(r#"name="perfume""#));
        assert!(request.contains(r#""title":"Bleu","brand":"Chanel""#));
        assert!(request.contains(r#""rating":4.5"#));
    }

    #[test]
    fn bad_request_carries_field_errors() {
        let (url, server) = serve_once(
            "400 Bad Request",
            r#"{"perfumeTitleError":"Fill in the input field","priceError":"Fill in the input field"}"#,
        );
        let outcome = catalog(url, None).submit(&payload()).unwrap();
        server.join().unwrap();

        let SubmissionOutcome::Rejected(errors) = outcome else {
            panic!("expected a rejection, got {outcome:?}");
        };
        assert_eq!(errors.error_for(Field::Title), Some("Fill in the input field"));
        assert_eq!(errors.error_for(Field::Price), Some("Fill in the input field"));
        assert_eq!(errors.error_for(Field::Brand), None);
    }

    #[test]
    fn server_error_is_not_a_verdict() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#);
        let err = catalog(url, None).submit(&payload()).unwrap_err();
        server.join().unwrap();

        assert!(matches!(
            err,
            SubmitError::UnexpectedStatus { status: 500, .. }
        ));
    }

    #[test]
    fn unreachable_backend_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/add")).unwrap();
        let err = catalog(url, None).submit(&payload()).unwrap_err();
        assert!(matches!(err, SubmitError::ReqwestError(_)));
    }

    #[test]
    fn list_length() {
        let (url, server) = serve_once("200 OK", r#"[{"id":1},{"id":2},{"id":3}]"#);
        assert_eq!(catalog(url, None).fetch_list_len().unwrap(), 3);
        let request = server.join().unwrap();
        assert!(request.starts_with("GET "));
    }
}

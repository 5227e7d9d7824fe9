//! REST backend: `GET/POST {root}/users`, `DELETE {root}/users/{id}`.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use super::{Backend, NewUser, User, UserId};
use crate::error::{Context, Result, StoreError};

const USER_AGENT: &str = concat!("userdesk/", env!("CARGO_PKG_VERSION"));

pub struct HttpBackend {
    client: Client,
    root: String,
}

impl HttpBackend {
    pub fn new(root: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()
            .with_ctx(|| "building HTTP client".to_string())?;
        Ok(Self::with_client(client, root))
    }

    fn with_client(client: Client, root: impl Into<String>) -> Self {
        let root = root.into().trim_end_matches('/').to_string();
        Self { client, root }
    }

    pub fn users_url(&self) -> String {
        format!("{}/users", self.root)
    }

    fn check(resp: Response, op: &'static str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(StoreError::Http { op, status: status.as_u16() })
        }
    }

    /// Read the whole body, then decode; unknown fields are ignored.
    fn decode<T: DeserializeOwned>(resp: Response, url: &str) -> Result<T> {
        let body = resp.bytes().with_ctx(|| format!("reading {url}"))?;
        serde_json::from_slice(&body).with_ctx(|| format!("decoding {url}"))
    }
}

impl Backend for HttpBackend {
    fn load(&self) -> Result<Vec<User>> {
        let url = self.users_url();
        let resp = self.client.get(&url).send().with_ctx(|| format!("GET {url}"))?;
        let resp = Self::check(resp, "fetch users")?;
        Self::decode(resp, &url)
    }

    fn remove(&self, id: UserId) -> Result<()> {
        let url = format!("{}/{id}", self.users_url());
        let resp = self.client.delete(&url).send().with_ctx(|| format!("DELETE {url}"))?;
        Self::check(resp, "delete user")?;
        Ok(())
    }

    fn create(&self, draft: &NewUser) -> Result<User> {
        let url = self.users_url();
        let resp = self.client.post(&url).json(draft).send().with_ctx(|| format!("POST {url}"))?;
        let resp = Self::check(resp, "add user")?;
        Self::decode(resp, &url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// One-shot server: answers a single request with `status` and `body`,
    /// and hands back the raw request it received.
    fn serve_once(status: &str, body: &str) -> (HttpBackend, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let root = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = std::thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let request = read_request(&mut conn);
            conn.write_all(response.as_bytes()).unwrap();
            request
        });
        let client = Client::builder().no_proxy().timeout(Duration::from_secs(5)).build().unwrap();
        (HttpBackend::with_client(client, root), handle)
    }

    fn read_request(conn: &mut impl Read) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let head_end = loop {
            let n = conn.read(&mut chunk).unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
        let body_len = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < head_end + body_len {
            let n = conn.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn root_trailing_slash_is_normalized() {
        let backend = HttpBackend::new("https://api.example.test/").unwrap();
        assert_eq!(backend.users_url(), "https://api.example.test/users");
    }

    #[test]
    fn user_array_decodes_and_ignores_extra_fields() {
        let body = r#"[{"id":1,"name":"Leanne Graham","email":"sincere@april.biz","username":"Bret","address":{"city":"Gwenborough"}},
                       {"id":2,"name":"Ervin Howell","email":"shanna@melissa.tv","phone":"010-692-6593"}]"#;
        let (backend, server) = serve_once("200 OK", body);
        let users = backend.load().unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /users HTTP/1.1\r\n"), "{request}");
        assert_eq!(
            users,
            vec![
                User { id: 1, name: "Leanne Graham".into(), email: "sincere@april.biz".into() },
                User { id: 2, name: "Ervin Howell".into(), email: "shanna@melissa.tv".into() },
            ]
        );
    }

    #[test]
    fn non_success_status_names_the_operation() {
        let (backend, server) = serve_once("404 Not Found", "{}");
        let err = backend.load().unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, StoreError::Http { op: "fetch users", status: 404 }), "{err:?}");

        let (backend, server) = serve_once("500 Internal Server Error", "");
        let err = backend.create(&NewUser::new("Dana", "dana@team.dev")).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, StoreError::Http { op: "add user", status: 500 }), "{err:?}");
        assert_eq!(err.to_string(), "add user: HTTP 500");
    }

    #[test]
    fn delete_targets_the_user_path() {
        let (backend, server) = serve_once("200 OK", "");
        backend.remove(7).unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("DELETE /users/7 HTTP/1.1\r\n"), "{request}");
    }

    #[test]
    fn create_posts_the_draft_and_decodes_the_reply() {
        let (backend, server) = serve_once("201 Created", r#"{"id":11,"name":"Dana","email":"dana@team.dev"}"#);
        let user = backend.create(&NewUser::new("Dana", "dana@team.dev")).unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /users HTTP/1.1\r\n"), "{request}");
        assert!(request.ends_with(r#"{"name":"Dana","email":"dana@team.dev"}"#), "{request}");
        assert_eq!(user, User { id: 11, name: "Dana".into(), email: "dana@team.dev".into() });
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let (backend, server) = serve_once("200 OK", r#"[{"id":"one"}]"#);
        let err = backend.load().unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, StoreError::Decode { .. }), "{err:?}");
    }
}

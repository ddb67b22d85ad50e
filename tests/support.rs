use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const SESSION_ID: &str = "e2e-session";
pub const VERSION: &str = "10.0.4.123";

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ServerHandle {
    /// Request lines seen so far, e.g. `GET /actifio/host`.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a fake appliance serving `/actifio/host` (one item) and `/actifio/slt` (no items).
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_appliance() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let host = addr.to_string();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let seen = Arc::clone(&seen);
                    let host = host.clone();
                    thread::spawn(move || handle_client(stream, &host, &seen));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        addr.to_string(),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            requests,
        },
    ))
}

/// Like [`spawn_appliance`], but skips when sockets are not permitted.
///
/// # Errors
///
/// Returns an error for any other bind failure.
pub fn spawn_appliance_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_appliance() {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut raw = Vec::new();
    let mut buffer = [0u8; 1024];
    loop {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            break;
        }
        raw.extend_from_slice(buffer.get(..read)?);
        if raw.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(raw).ok()
}

fn header<'req>(head: &'req str, name: &str) -> Option<&'req str> {
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then_some(value.trim())
    })
}

fn route(method: &str, path: &str, head: &str, host: &str) -> (u16, String) {
    if method == "POST" && path == "/actifio/session" {
        let expected = format!("Basic {}", basic_credentials());
        return if header(head, "authorization") == Some(expected.as_str()) {
            (200, format!("{{\"session_id\":\"{}\"}}", SESSION_ID))
        } else {
            (401, "{\"errormessage\":\"bad credentials\"}".to_owned())
        };
    }

    let expected = format!("Actifio {}", SESSION_ID);
    if header(head, "authorization") != Some(expected.as_str()) {
        return (401, "{}".to_owned());
    }

    match (method, path) {
        ("DELETE", p) if p == format!("/actifio/session/{}", SESSION_ID) => (200, "{}".to_owned()),
        ("GET", "/actifio/config/version") => {
            (200, format!("{{\"summary\":\"{}\"}}", VERSION))
        }
        ("GET" | "HEAD", "/actifio/host") => (
            200,
            format!(
                "{{\"count\":2,\"items\":[{{\"href\":\"http://{}/actifio/host/7\"}},{{\"href\":\"http://{}/actifio/host/8\"}}]}}",
                host, host
            ),
        ),
        ("GET" | "HEAD", "/actifio/host/7") => (200, "{\"id\":\"7\"}".to_owned()),
        ("GET" | "HEAD", "/actifio/slt") => (200, "{\"count\":0,\"items\":[]}".to_owned()),
        _ => (404, "{}".to_owned()),
    }
}

fn handle_client(mut stream: TcpStream, host: &str, seen: &Mutex<Vec<String>>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    drop(stream.set_read_timeout(Some(Duration::from_secs(5))));
    let Some(head) = read_head(&mut stream) else {
        return;
    };
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let path = request_line.next().unwrap_or_default().to_owned();
    if let Ok(mut requests) = seen.lock() {
        requests.push(format!("{} {}", method, path));
    }

    let (status, body) = route(&method, &path, &head, host);
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        _ => "Not Found",
    };
    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    if method != "HEAD" {
        response.push_str(&body);
    }
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn basic_credentials() -> String {
    encode_base64(format!("{}:{}", USERNAME, PASSWORD).as_bytes())
}

fn encode_base64(input: &[u8]) -> String {
    const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::new();
    for chunk in input.chunks(3) {
        let b0 = u32::from(chunk.first().copied().unwrap_or(0));
        let b1 = u32::from(chunk.get(1).copied().unwrap_or(0));
        let b2 = u32::from(chunk.get(2).copied().unwrap_or(0));
        let triple = (b0 << 16) | (b1 << 8) | b2;
        for (index, shift) in [18u32, 12, 6, 0].into_iter().enumerate() {
            if index <= chunk.len() {
                let sextet = usize::try_from((triple >> shift) & 0x3f).unwrap_or(0);
                out.push(char::from(ALPHABET.get(sextet).copied().unwrap_or(b'=')));
            } else {
                out.push('=');
            }
        }
    }
    out
}

/// Run the `apiprof` binary with a clean environment and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apiprof<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = apiprof_bin()?;
    Command::new(bin)
        .args(args)
        .env("APIPROF_LOG", "error")
        .env_remove("APIPROF_HOST")
        .env_remove("APIPROF_USER")
        .env_remove("APIPROF_PASSWORD")
        .env_remove("RUST_LOG")
        .output()
        .map_err(|err| format!("run apiprof failed: {}", err))
}

fn apiprof_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_apiprof").map_or_else(
        || Err("CARGO_BIN_EXE_apiprof missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

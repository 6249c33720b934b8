/*
 * ============================================================================
 * XEVAL - Expression Evaluator
 * ============================================================================
 *
 * HTTP Front-End
 * --------------
 * Minimal HTTP server exposing the evaluator:
 *
 *   GET /                        → plain-text liveness check
 *   GET /evaluate/:expression    → binding from query parameters
 *   PUT /evaluate                → JSON body {expression, values}
 *
 * Successful evaluations answer `{"result": <value>}`; failures answer
 * `{"error": <message>}` with a 400 status. One thread per connection;
 * the expression is parsed per request and evaluated against a fresh
 * binding, which is safe because parsed trees are immutable.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * GitHub:   https://github.com/samwilcox/xeval
 *
 * License:
 * This file is part of the XEVAL expression evaluator project.
 *
 * XEVAL is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *     https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::value::{Binding, Value};

pub const DEFAULT_PORT: u16 = 3000;

/// Requests are read with a single bounded read; bodies beyond this are
/// truncated and will fail JSON parsing rather than hang the server.
const MAX_REQUEST_BYTES: usize = 8192;

#[derive(Debug, Deserialize)]
struct EvaluateRequest {
    expression: String,
    #[serde(default)]
    values: Binding,
}

struct Response {
    status: &'static str,
    content_type: &'static str,
    body: String,
}

impl Response {
    fn json(status: &'static str, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: &'static str, message: impl std::fmt::Display) -> Self {
        Self::json(
            status,
            serde_json::json!({ "error": message.to_string() }).to_string(),
        )
    }
}

/* ============================================================================
 * PUBLIC API
 * ============================================================================
 */

/// Binds the listener and serves until the process exits.
pub fn serve(port: u16, config: Arc<Config>) -> std::io::Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port))?;

    println!("Listening on http://localhost:{}", port);

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(s) => s,
            Err(_) => continue,
        };

        let config = config.clone();
        thread::spawn(move || handle_connection(stream, config));
    }

    Ok(())
}

/// Parses and evaluates one expression against one binding, logging the
/// canonical form and the resolved binding at debug level.
pub fn evaluate_once(
    expression: &str,
    binding: &Binding,
    config: Arc<Config>,
) -> Result<Value, Error> {
    let expr = crate::parse_with_config(expression, config)?;

    debug!(
        canonical = %expr.to_canonical_string(),
        binding = ?binding,
        "evaluating"
    );

    Ok(expr.evaluate(binding)?)
}

/* ============================================================================
 * SERVER CORE
 * ============================================================================
 */

fn handle_connection(mut stream: TcpStream, config: Arc<Config>) {
    let mut buffer = [0u8; MAX_REQUEST_BYTES];
    let bytes_read = match stream.read(&mut buffer) {
        Ok(n) if n > 0 => n,
        _ => return,
    };

    let raw_request = String::from_utf8_lossy(&buffer[..bytes_read]).to_string();
    let response = route(&raw_request, &config);

    let payload = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: {}\r\nAccess-Control-Allow-Origin: *\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.content_type,
        response.body
    );

    let _ = stream.write_all(payload.as_bytes());
    let _ = stream.flush();
}

fn route(raw_request: &str, config: &Arc<Config>) -> Response {
    let mut lines = raw_request.lines();
    let request_line = lines.next().unwrap_or("");
    let parts: Vec<&str> = request_line.split_whitespace().collect();

    let method = *parts.first().unwrap_or(&"GET");
    let full_path = *parts.get(1).unwrap_or(&"/");
    let (path, query) = split_path_query(full_path);

    // Body starts after the first empty line.
    let mut body = String::new();
    let mut reading_body = false;
    for line in lines {
        if !reading_body && line.is_empty() {
            reading_body = true;
            continue;
        }
        if reading_body {
            body.push_str(line);
        }
    }

    match (method, path) {
        ("GET", "/") => Response {
            status: "200 OK",
            content_type: "text/plain",
            body: "Test".to_string(),
        },

        ("GET", p) if p.starts_with("/evaluate/") => {
            let expression = percent_decode(&p["/evaluate/".len()..]);
            let binding = query_binding(query);
            evaluate_response(&expression, binding, config)
        }

        ("PUT", "/evaluate") => match serde_json::from_str::<EvaluateRequest>(&body) {
            Ok(request) => evaluate_response(&request.expression, request.values, config),
            Err(e) => Response::error("400 Bad Request", format!("invalid request body: {}", e)),
        },

        _ => Response::error("404 Not Found", "not found"),
    }
}

fn evaluate_response(expression: &str, binding: Binding, config: &Arc<Config>) -> Response {
    match evaluate_once(expression, &binding, config.clone()) {
        Ok(value) => Response::json(
            "200 OK",
            serde_json::json!({ "result": value }).to_string(),
        ),
        Err(e) => Response::error("400 Bad Request", e),
    }
}

/* ============================================================================
 * REQUEST PARSING HELPERS
 * ============================================================================
 */

fn split_path_query(full_path: &str) -> (&str, &str) {
    match full_path.split_once('?') {
        Some((path, query)) => (path, query),
        None => (full_path, ""),
    }
}

/// Builds a binding from `a=1&name=bob` style query strings, with the same
/// value coercion the CLI applies to `name=value` pairs.
fn query_binding(query: &str) -> Binding {
    let mut binding = Binding::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name, value),
            None => (pair, ""),
        };

        binding.insert(
            percent_decode(name).trim().to_string(),
            Value::from_cli_literal(&percent_decode(value)),
        );
    }

    binding
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

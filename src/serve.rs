//! HTTP server for interactive leaderboard mode
//!
//! `attention_board serve ./data` → starts server, opens browser, shows the board

use crate::config::DataPaths;
use crate::error::Error;
use crate::report::html;
use crate::report::json::ViewReport;
use crate::source::TableSource;
use crate::tables::InterventionType;
use crate::view::ViewParams;
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(message: String) -> Self {
        Self { ok: false, data: None, error: Some(message) }
    }
}

/// Raw query string parameters; anything unparseable falls back to the default.
#[derive(Deserialize, Debug, Default)]
pub struct ViewQuery {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub plays: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ViewQuery {
    pub fn from_url(url: &str) -> Self {
        url.split_once('?')
            .and_then(|(_, query)| serde_urlencoded::from_str(query).ok())
            .unwrap_or_default()
    }

    pub fn params(&self) -> ViewParams {
        let defaults = ViewParams::default();
        ViewParams {
            position: parse_or(self.position.as_deref(), defaults.position),
            plays: parse_or(self.plays.as_deref(), defaults.plays),
            sort: parse_or(self.sort.as_deref(), defaults.sort),
        }
    }
}

fn parse_or<T: std::str::FromStr<Err = String>>(raw: Option<&str>, default: T) -> T {
    match raw.map(str::parse::<T>) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            log::warn!("{}, using default", e);
            default
        }
        None => default,
    }
}

/// Start server, open browser, serve the board
pub fn start(port: u16, paths: DataPaths, kind: InterventionType) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let url = format!("http://localhost:{}", port);

    eprintln!("\n\x1b[1;32m🏈 Attention Board\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Data: {}\n", paths.attention.display());

    let mut source = TableSource::new(paths, kind);

    // Open browser
    let _ = open::that(&url);

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &mut source) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn with_content_type<R: std::io::Read>(response: Response<R>, value: &str) -> Response<R> {
    match Header::from_bytes(&b"Content-Type"[..], value.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

fn handle_request(request: Request, source: &mut TableSource) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        // Leaderboard page
        (&Method::Get, "/") => {
            let params = ViewQuery::from_url(&url).params();
            log::info!("GET / {:?}", params);
            match source.board() {
                Ok(board) => {
                    let page = html::render(board, &board.view(&params), true);
                    request.respond(with_content_type(Response::from_string(page), "text/html; charset=utf-8"))
                }
                Err(e) => respond_error(request, &e),
            }
        }

        // API: ranked view as JSON
        (&Method::Get, "/api/view") => {
            let params = ViewQuery::from_url(&url).params();
            log::info!("GET /api/view {:?}", params);
            let json = match source.board() {
                Ok(board) => {
                    let view = board.view(&params);
                    serde_json::to_string(&ApiResponse::success(ViewReport::new(board, &view)))?
                }
                Err(e) => serde_json::to_string(&ApiResponse::failure(e.to_string()))?,
            };
            request.respond(with_content_type(Response::from_string(json), "application/json"))
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_error(request: Request, error: &Error) -> std::io::Result<()> {
    log::error!("{}", error);
    let body = format!("<h1>Could not load data</h1><pre>{}</pre>", html::escape(&error.to_string()));
    let response = with_content_type(
        Response::from_string(body).with_status_code(500),
        "text/html; charset=utf-8",
    );
    request.respond(response)
}

//! HTTP server for the interactive dashboard.
//!
//! One page with a fixed six-value chain dropdown and two SVG chart
//! endpoints. Unknown chain identifiers surface as a 404 message at the
//! interaction boundary; the server process keeps running.

use super::context::DashboardContext;
use crate::loader::schema::Chain;
use crate::utils::error::DashboardError;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use log::{info, warn};
use std::sync::Arc;

/// Build the dashboard router over a shared read-only context
///
/// **Public** - separated from `run_server` so tests can drive it directly
pub fn router(context: Arc<DashboardContext>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/charts/{chain}/volumes.svg", get(volumes_chart))
        .route("/charts/{chain}/liquidity.svg", get(liquidity_chart))
        .with_state(context)
}

/// Bind and serve the dashboard until externally terminated
///
/// **Public** - called from the serve command inside a tokio runtime
pub async fn run_server(context: Arc<DashboardContext>, port: u16) -> anyhow::Result<()> {
    let app = router(context);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Serve the dashboard page: dropdown plus two chart slots
///
/// **Private** - handler for GET /
async fn index_page() -> Html<String> {
    Html(render_index())
}

/// Serve the volume-components chart for the selected chain
///
/// **Private** - handler for GET /charts/{chain}/volumes.svg
async fn volumes_chart(
    State(context): State<Arc<DashboardContext>>,
    Path(chain): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let svg = context.volume_chart(&chain).map_err(error_response)?;
    Ok(svg_response(svg))
}

/// Serve the liquidity chart for the selected chain
///
/// **Private** - handler for GET /charts/{chain}/liquidity.svg
async fn liquidity_chart(
    State(context): State<Arc<DashboardContext>>,
    Path(chain): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let svg = context.liquidity_chart(&chain).map_err(error_response)?;
    Ok(svg_response(svg))
}

fn svg_response(svg: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

/// Map dashboard errors to visible HTTP responses instead of crashing
///
/// **Private** - the interaction boundary for `ChainNotFound`
fn error_response(err: DashboardError) -> (StatusCode, String) {
    match &err {
        DashboardError::ChainNotFound(_) => {
            warn!("{}", err);
            (StatusCode::NOT_FOUND, err.to_string())
        }
        DashboardError::ChartFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Render the single dashboard page
///
/// **Private** - the dropdown enumerates exactly the six known chains
fn render_index() -> String {
    let options: String = Chain::ALL
        .iter()
        .map(|chain| format!(r#"<option value="{}">{}</option>"#, chain.id(), chain.label()))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>DEX Trading Volumes and Liquidity Dashboard</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
select {{ width: 50%; padding: 4px; margin-bottom: 1em; }}
img {{ display: block; margin-bottom: 1em; border: 1px solid #ddd; max-width: 100%; }}
</style>
</head>
<body>
<h1>DEX Trading Volumes and Liquidity Dashboard</h1>
<select id="chain-dropdown">{options}</select>
<img id="volume-graph" alt="Trading volumes"/>
<img id="liquidity-graph" alt="USD liquidity"/>
<script>
const dropdown = document.getElementById('chain-dropdown');
function update() {{
  const chain = dropdown.value;
  document.getElementById('volume-graph').src = '/charts/' + chain + '/volumes.svg';
  document.getElementById('liquidity-graph').src = '/charts/' + chain + '/liquidity.svg';
}}
dropdown.addEventListener('change', update);
update();
</script>
</body>
</html>"#,
        options = options
    )
}

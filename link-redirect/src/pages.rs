//! Control panel handlers.
//!
//! The panel shows the live allocator's progress and a form to install a new
//! configuration. Submitting the form always starts a fresh allocation run.

use askama::Template;
use axum::extract::Form;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use link_alloc::Allocator;
use link_alloc::ProgressRow;
use link_alloc::project;
use tracing::info;
use tracing::warn;

use crate::AppState;
use crate::ServerError;
use crate::form::SetForm;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<html>
<body>

<h2>Current Setup:</h2>
<p>Primary redirect URL:  http://{{ host }}/redirectLink</p>
<p>Group Size: {{ group_size }}</p>
{%- if let Some(error) = error %}
<p style="color:red">Rejected: {{ error }}</p>
{%- endif %}
<table>
<tr><th>URL</th><th>Count</th></tr>
{%- for row in rows %}
<tr{% if row.active %} style="font-weight:bold"{% endif %}><td>{{ row.url }}</td><td>({{ row.delivered }}/{{ row.max }})</td></tr>
{%- endfor %}
</table>
<br>
<h2>Create New:</h2>
<p>Enter the number of users to be sent to each subsequent URL. And a list of URLs separated by newlines.</p>
<p>Each URL will be "filled" in the order entered. Resubmitting the form with the same info will reset the user counter to the beginning.</p>
<form method="POST" id="redirectForm">
<label for="count">Redirect Count to each URL:</label>
<br>
<input type="number" id="count" name="countPer" value="{{ count_per }}" min="1" required>
<br>
<label for="groupSize">Group size (must divide the Redirect Count):</label>
<br>
<input type="number" id="groupSize" name="groupSize" value="{{ group_size }}" min="1" required>
<br>
<label for="urls">URLs (separated by new line):</label>
<br>
<textarea id="urls" name="urlList" rows="10" cols="100" required>
{%- for url in urls %}
{{ url }}
{%- endfor -%}
</textarea>
<br>
<button>Set Redirect</button>
</form>

</body>
</html>
"#
)]
struct PanelTemplate<'a> {
    host: &'a str,
    count_per: usize,
    group_size: usize,
    rows: Vec<ProgressRow>,
    urls: Vec<String>,
    error: Option<String>,
}

fn render_panel(state: &AppState, error: Option<String>) -> Result<Html<String>, ServerError> {
    let snapshot = state.allocator.info();
    let rows = snapshot.as_ref().map(project).unwrap_or_default();
    let (count_per, group_size, urls) = snapshot
        .map(|s| (s.quota_per_url, s.group_size, s.urls))
        .unwrap_or_default();

    let page = PanelTemplate {
        host: &state.host,
        count_per,
        group_size,
        rows,
        urls,
        error,
    }
    .render()?;
    Ok(Html(page))
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    render_panel(&state, None)
}

/// `POST /`
pub async fn set(State(state): State<AppState>, Form(form): Form<SetForm>) -> Response {
    match form.into_config() {
        Ok(config) => {
            if let Some(previous) = state.allocator.install(config) {
                info!(
                    discarded_progress = previous.info().served,
                    "replaced redirect configuration"
                );
            }
            render_panel(&state, None).into_response()
        }
        Err(err) => {
            warn!(error = %err, "rejected redirect configuration");
            let err = ServerError::from(err);
            match render_panel(&state, Some(err.to_string())) {
                Ok(page) => (err.status_code(), page).into_response(),
                Err(render_err) => render_err.into_response(),
            }
        }
    }
}

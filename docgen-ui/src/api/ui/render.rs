//! HTML rendering for the root page
//!
//! Pure functions from workflow views to markup. All user- or
//! backend-supplied text passes through [`escape_html`].

use std::fmt::Write;

use base64::Engine as _;
use docgen_common::document::SUPPORTED_EXTENSIONS;
use docgen_common::{DocLevel, DocType};

use crate::workflow::{Preview, UploadView};

/// Severity of a page notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// One-off message shown at the top of the documentation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn notice_html(kind: NoticeKind, message: &str) -> String {
    format!(
        r#"<div class="notice {}">{}</div>"#,
        kind.css_class(),
        escape_html(message)
    )
}

/// Render the full page
pub fn render_page(views: &[UploadView], notice: Option<&Notice>) -> String {
    let mut body = String::new();

    if let Some(notice) = notice {
        body.push_str(&notice_html(notice.kind, &notice.message));
    }

    if views.is_empty() {
        body.push_str(&notice_html(
            NoticeKind::Info,
            "No files have been uploaded yet. Upload a file to get started.",
        ));
    } else {
        body.push_str(
            r#"<form method="get" action="/"><button type="submit">Refresh Status</button></form>"#,
        );
        for view in views {
            body.push_str(&render_upload(view));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Project Documentation Generator</title>
    <link rel="stylesheet" href="/static/docgen.css">
    <script src="/static/docgen.js" defer></script>
</head>
<body>
    <header>
        <h1>Project Documentation Generator</h1>
        <div class="build-info">v{version} [{git_hash}]<br>{build_timestamp}</div>
    </header>
    <div class="layout">
        <aside>
{sidebar}
        </aside>
        <main>
            <h2>Generated Documentation</h2>
{body}
        </main>
    </div>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        build_timestamp = env!("BUILD_TIMESTAMP"),
        sidebar = render_upload_form(),
        body = body,
    )
}

/// Sidebar upload form
fn render_upload_form() -> String {
    let accept: Vec<String> = SUPPORTED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();

    let mut html = String::new();
    html.push_str("<h2>Upload Media</h2>\n");
    html.push_str("<p>Upload audio or video files to generate project documentation.</p>\n");
    html.push_str(r#"<form method="post" action="/upload" enctype="multipart/form-data">"#);

    html.push_str(r#"<label for="doc_type">Select Document Type</label><select id="doc_type" name="doc_type">"#);
    for doc_type in DocType::all_variants() {
        let selected = if doc_type == DocType::default() { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{0}"{1}>{0}</option>"#,
            doc_type.as_str(),
            selected
        );
    }
    html.push_str("</select>");
    for doc_type in DocType::all_variants() {
        let _ = write!(
            html,
            r#"<p class="hint" data-hint-for="doc_type" data-value="{}">{}</p>"#,
            doc_type.as_str(),
            escape_html(doc_type.description())
        );
    }

    let _ = write!(
        html,
        r#"<label for="file">Choose a media file</label><input id="file" type="file" name="file" accept="{}" required>"#,
        accept.join(",")
    );

    html.push_str(r#"<label for="doc_level">Select Documentation Level</label><select id="doc_level" name="doc_level">"#);
    for doc_level in DocLevel::all_variants() {
        let selected = if doc_level == DocLevel::default() { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{0}"{1}>{0}</option>"#,
            doc_level.as_str(),
            selected
        );
    }
    html.push_str("</select>");
    for doc_level in DocLevel::all_variants() {
        let _ = write!(
            html,
            r#"<p class="hint" data-hint-for="doc_level" data-value="{}">{}</p>"#,
            doc_level.as_str(),
            escape_html(doc_level.description())
        );
    }

    html.push_str(r#"<button type="submit">Process File</button></form>"#);
    html
}

/// One upload: header, then progress or artifacts
fn render_upload(view: &UploadView) -> String {
    let record = &view.upload.record;
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<section class="upload"><h3>File: {}</h3><p class="meta">File ID: <code>{}</code> · {} · {} · submitted {}</p>"#,
        escape_html(record.filename()),
        escape_html(record.file_id()),
        record.doc_type(),
        record.doc_level(),
        record.submitted_at().format("%Y-%m-%d %H:%M:%S UTC")
    );

    if view.poll.state.is_ready() {
        html.push_str(r#"<div class="downloads">"#);
        for link in &view.links {
            let _ = write!(
                html,
                r#"<a class="download-btn" href="{}" target="_blank">{}</a>"#,
                escape_html(&link.url),
                link.label
            );
        }
        html.push_str("</div>");

        match &view.preview {
            Preview::Available(bytes) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                let _ = write!(
                    html,
                    r#"<h4>PDF Preview</h4><iframe class="pdf-viewer" src="data:application/pdf;base64,{}"></iframe>"#,
                    encoded
                );
            }
            Preview::Unavailable(_) | Preview::Pending => {
                html.push_str(&notice_html(
                    NoticeKind::Warning,
                    "PDF content not available. Try refreshing.",
                ));
            }
        }
    } else {
        html.push_str(&notice_html(
            NoticeKind::Info,
            "Documentation is not ready yet. Please wait or refresh.",
        ));
        html.push_str(&render_progress(view));
    }

    html.push_str("</section>");
    html
}

fn render_progress(view: &UploadView) -> String {
    match &view.poll.progress {
        Some(report) => {
            let mut html = format!(
                r#"<p>Processing status: {}</p><div class="progress-bar"><div class="progress-fill" style="width: {}%"></div></div><p>Progress: {}% · Current stage: {}</p>"#,
                escape_html(&report.status),
                report.progress,
                report.progress,
                escape_html(&report.current_stage)
            );
            if let Some(error) = report.error.as_deref().filter(|_| report.has_error()) {
                html.push_str(&notice_html(
                    NoticeKind::Error,
                    &format!("Processing error: {}", error),
                ));
            }
            html
        }
        None => match &view.poll.progress_note {
            Some(note) => format!(r#"<p class="meta">{}</p>"#, escape_html(note)),
            None => String::new(),
        },
    }
}

//! HTML pages for the upload form and the extraction result.

use crate::models::statement::{COLUMNS, StatementRow};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
table{border-collapse:collapse;}\
th,td{border:1px solid #999;padding:.3rem .6rem;text-align:left;}\
th{background:#eee;}";

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// The upload form.
pub fn index_page() -> String {
    page(
        "Statement Extractor",
        "<h1>Upload a card statement</h1>\n\
         <form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\".pdf,.docx\" required>\n\
         <button type=\"submit\">Extract</button>\n\
         </form>\n\
         <p>PDF (text or scanned) and DOCX statements are supported.</p>\n",
    )
}

/// The extracted rows as a table, with a link to the CSV export.
pub fn result_page(file_name: &str, rows: &[StatementRow]) -> String {
    let mut body = format!(
        "<h1>Extracted transactions</h1>\n<p>Source: {}</p>\n",
        escape_html(file_name)
    );

    if rows.is_empty() {
        body.push_str("<p>No transactions were found in this statement.</p>\n");
    } else {
        body.push_str("<table>\n<thead><tr>");
        for column in COLUMNS {
            body.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        body.push_str("</tr></thead>\n<tbody>\n");
        for row in rows {
            body.push_str("<tr>");
            for value in row.values() {
                body.push_str(&format!("<td>{}</td>", escape_html(value)));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str("<p><a href=\"/download\">Download CSV</a> | <a href=\"/\">Upload another</a></p>\n");
    page("Extraction Result", &body)
}

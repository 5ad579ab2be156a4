use std::fmt::Write as FmtWrite;

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::Listing;
use crate::storage::human_readable_size;

/// `GET /index` in upload mode
pub async fn upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

/// Render a directory listing. Every name and link is HTML-escaped.
pub fn render_listing(listing: &Listing) -> Result<String, std::fmt::Error> {
    let mut rows = String::new();

    if let Some(parent) = listing.parent_link() {
        write!(
            rows,
            r#"
            <li class="parent"><a href="{href}">..</a></li>"#,
            href = encode_double_quoted_attribute(&parent),
        )?;
    }

    for entry in &listing.entries {
        let detail = if entry.is_dir {
            "folder".to_string()
        } else {
            human_readable_size(entry.size)
        };
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        write!(
            rows,
            r#"
            <li class="{kind}">
                <a href="{href}">{name}</a>
                <span class="meta">{detail} {modified}</span>
            </li>"#,
            kind = if entry.is_dir { "dir" } else { "file" },
            href = encode_double_quoted_attribute(&entry.link),
            name = encode_text(&entry.name),
            detail = detail,
            modified = modified,
        )?;
    }

    let mut page = String::new();
    write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Files in {title}</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            background-color: #1c1c1e;
            color: #f2f2f7;
        }}
        header {{
            background-color: #2c2c2e;
            padding: 20px;
            text-align: center;
        }}
        h1 {{
            margin: 0;
            font-size: 28px;
            word-break: break-all;
        }}
        nav {{
            max-width: 640px;
            margin: 24px auto;
            padding: 0 16px;
        }}
        ul {{
            list-style: none;
            padding: 0;
            margin: 0;
        }}
        li {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            gap: 12px;
            margin: 8px 0;
            padding: 12px 16px;
            border-radius: 10px;
            background-color: #2c2c2e;
        }}
        li.dir a {{ color: #64d2ff; }}
        a {{
            color: #0a84ff;
            text-decoration: none;
            word-break: break-all;
        }}
        a:hover {{ text-decoration: underline; }}
        .meta {{
            color: #8e8e93;
            font-size: 13px;
            white-space: nowrap;
        }}
        .empty {{ text-align: center; color: #8e8e93; }}
    </style>
</head>
<body>
    <header>
        <h1>{title}</h1>
    </header>
    <nav>
        <ul>{rows}
        </ul>{empty}
    </nav>
</body>
</html>
"#,
        title = encode_text(&listing.path),
        rows = rows,
        empty = if listing.entries.is_empty() {
            r#"
        <p class="empty">This folder is empty</p>"#
        } else {
            ""
        },
    )?;
    Ok(page)
}

const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Upload files</title>
    <style>
        body {
            font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
            background-color: #1c1c1e;
            margin: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        .card {
            background-color: #2c2c2e;
            border-radius: 12px;
            box-shadow: 0 8px 24px rgba(0, 0, 0, 0.3);
            padding: 32px;
            max-width: 480px;
            text-align: center;
        }
        h1 {
            font-size: 22px;
            margin: 0 0 24px;
            color: #f2f2f7;
        }
        .upload-btn {
            border: none;
            background: linear-gradient(to right, #0a84ff, #30d158);
            color: #fff;
            padding: 14px 32px;
            font-size: 18px;
            border-radius: 8px;
            cursor: pointer;
        }
        .upload-btn:active {
            opacity: 0.8;
        }
        .overlay {
            display: none;
            position: fixed;
            inset: 0;
            background-color: rgba(0, 0, 0, 0.6);
            z-index: 10;
            justify-content: center;
            align-items: center;
            color: #fff;
            font-size: 20px;
        }
    </style>
</head>
<body>
    <div class="card">
        <h1>Choose files to send</h1>
        <input id="file-input" type="file" name="file" multiple hidden>
        <button id="upload-btn" class="upload-btn">Select files</button>
    </div>
    <div id="overlay" class="overlay">Uploading...</div>

    <script>
        var input = document.getElementById('file-input');
        var overlay = document.getElementById('overlay');

        document.getElementById('upload-btn').addEventListener('click', function () {
            input.click();
        });

        input.addEventListener('change', function () {
            if (input.files.length > 0) {
                upload(input.files);
            }
        });

        function upload(files) {
            var form = new FormData();
            for (var i = 0; i < files.length; i++) {
                form.append('file', files[i]);
            }

            var xhr = new XMLHttpRequest();
            xhr.open('POST', '/upload');
            xhr.onloadstart = function () {
                overlay.style.display = 'flex';
            };
            xhr.onload = function () {
                overlay.style.display = 'none';
                input.value = '';
                if (xhr.status === 200) {
                    alert('Upload complete');
                } else {
                    alert('Upload failed: ' + xhr.responseText);
                }
            };
            xhr.onerror = function () {
                overlay.style.display = 'none';
                alert('Upload failed, status ' + xhr.status);
            };
            xhr.send(form);
        }
    </script>
</body>
</html>
"#;

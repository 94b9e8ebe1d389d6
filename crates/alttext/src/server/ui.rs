//! The form page: three input modes wired to the caption endpoints.

use axum::response::Html;

/// GET / — serve the static form page.
pub(super) async fn index() -> Html<&'static str> {
    Html(PAGE)
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Alt Text Generator</title>
<style>
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    max-width: 760px;
    margin: 0 auto;
    padding: 24px;
    color: #222;
  }
  h1 { font-size: 1.6em; margin-bottom: 4px; }
  .subtitle { color: #666; margin-bottom: 24px; }
  section {
    border: 1px solid #ddd;
    border-radius: 8px;
    padding: 16px 20px;
    margin-bottom: 20px;
  }
  h2 { font-size: 1.1em; margin-top: 0; }
  input[type="url"], textarea {
    width: 100%;
    box-sizing: border-box;
    padding: 8px;
    border: 1px solid #ccc;
    border-radius: 4px;
    font: inherit;
  }
  textarea { min-height: 110px; resize: vertical; }
  label.words { display: block; margin: 10px 0; color: #444; }
  input[type="number"] { width: 70px; padding: 4px; }
  button {
    padding: 8px 16px;
    border: none;
    border-radius: 4px;
    background: #2563eb;
    color: white;
    font: inherit;
    cursor: pointer;
    margin-right: 8px;
  }
  button.secondary { background: #64748b; }
  button:disabled { background: #9ca3af; }
  table { width: 100%; border-collapse: collapse; margin-top: 12px; }
  th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #eee; }
  td.err { color: #b91c1c; }
  .warning { color: #b45309; margin-top: 10px; }
</style>
</head>
<body>
<h1>Alt Text Generator</h1>
<p class="subtitle">Short image descriptions from a pretrained captioning model.</p>

<section>
  <h2>Single URL</h2>
  <input type="url" id="single-url" placeholder="https://example.com/image.jpg">
  <label class="words">Max words <input type="number" id="single-words" value="20" min="1"></label>
  <button id="single-go">Generate</button>
  <div id="single-out"></div>
</section>

<section>
  <h2>Batch URLs</h2>
  <form id="batch-form" method="post" action="/api/batch?format=csv">
    <textarea name="urls" id="batch-urls" placeholder="One image URL per line; blank lines are skipped"></textarea>
    <label class="words">Max words <input type="number" name="max_words" id="batch-words" value="20" min="1"></label>
    <button type="button" id="batch-go">Generate</button>
    <button type="submit" class="secondary">Download CSV</button>
  </form>
  <div id="batch-out"></div>
</section>

<section>
  <h2>File Uploads</h2>
  <form id="upload-form" method="post" action="/api/upload?format=csv" enctype="multipart/form-data">
    <input type="file" name="files" id="upload-files" accept="image/jpeg,image/png" multiple>
    <label class="words">Max words <input type="number" name="max_words" id="upload-words" value="20" min="1"></label>
    <button type="button" id="upload-go">Generate</button>
    <button type="submit" class="secondary">Download CSV</button>
  </form>
  <div id="upload-out"></div>
</section>

<script>
function renderRows(target, rows) {
  if (!rows.length) {
    target.innerHTML = '<p class="warning">No results.</p>';
    return;
  }
  let html = '<table><tr><th>Source</th><th>Alt text</th></tr>';
  for (const row of rows) {
    const cls = row.alt_text.startsWith('Error: ') ? ' class="err"' : '';
    html += '<tr><td>' + escapeHtml(row.source) + '</td><td' + cls + '>' +
            escapeHtml(row.alt_text) + '</td></tr>';
  }
  target.innerHTML = html + '</table>';
}

function escapeHtml(text) {
  const div = document.createElement('div');
  div.textContent = text;
  return div.innerHTML;
}

async function post(url, body, target, button) {
  button.disabled = true;
  target.innerHTML = '<p>Generating…</p>';
  try {
    const response = await fetch(url, { method: 'POST', body });
    const data = await response.json();
    if (!response.ok) {
      target.innerHTML = '<p class="warning">' + escapeHtml(data.error || 'Request failed') + '</p>';
      return;
    }
    renderRows(target, Array.isArray(data) ? data : [data]);
  } catch (err) {
    target.innerHTML = '<p class="warning">' + escapeHtml(err.message) + '</p>';
  } finally {
    button.disabled = false;
  }
}

document.getElementById('single-go').addEventListener('click', (e) => {
  const body = new URLSearchParams({
    url: document.getElementById('single-url').value,
    max_words: document.getElementById('single-words').value,
  });
  post('/api/caption', body, document.getElementById('single-out'), e.target);
});

document.getElementById('batch-go').addEventListener('click', (e) => {
  const body = new URLSearchParams({
    urls: document.getElementById('batch-urls').value,
    max_words: document.getElementById('batch-words').value,
  });
  post('/api/batch', body, document.getElementById('batch-out'), e.target);
});

document.getElementById('upload-go').addEventListener('click', (e) => {
  const body = new FormData();
  for (const file of document.getElementById('upload-files').files) {
    body.append('files', file);
  }
  body.append('max_words', document.getElementById('upload-words').value);
  post('/api/upload', body, document.getElementById('upload-out'), e.target);
});
</script>
</body>
</html>
"#;

use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/ui", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Financial Document Analyzer</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; color: #1d1d1f; max-width: 960px; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    textarea { width: 100%; padding: 0.5rem; min-height: 4rem; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    pre { background: #f6f8fa; padding: 1rem; overflow: auto; white-space: pre-wrap; }
    .banner { padding: 0.75rem; border-radius: 6px; margin-bottom: 1rem; display: none; }
    .banner.error { background: #fdecea; color: #8a1c1c; display: block; }
    .banner.success { background: #e7f6ec; color: #1b5e20; display: block; }
    .banner.info { background: #eef4fb; color: #0b3c6f; display: block; }
  </style>
</head>
<body>
  <h1>Financial Document Analyzer</h1>
  <p>Upload a financial PDF and get investment insights.</p>

  <div id="banner" class="banner"></div>

  <div class="card">
    <label for="fileInput">Upload Financial PDF</label>
    <input id="fileInput" type="file" accept=".pdf,application/pdf" />
    <label for="queryInput">Enter your analysis query</label>
    <textarea id="queryInput">Analyze this financial document for investment insights</textarea>
    <button id="analyzeBtn">Analyze Document</button>
  </div>

  <div id="results" class="card" style="display: none">
    <h2>Query Used</h2>
    <p id="queryUsed"></p>
    <h2>File Processed</h2>
    <p id="fileProcessed"></p>
    <h2>Investment Analysis</h2>
    <pre id="analysis"></pre>
  </div>

  <pre id="errorBody" style="display: none"></pre>

  <script>
    const analyzeBtn = document.getElementById('analyzeBtn');
    const banner = document.getElementById('banner');
    const results = document.getElementById('results');
    const errorBody = document.getElementById('errorBody');

    function showBanner(kind, text) {
      banner.className = 'banner ' + kind;
      banner.textContent = text;
    }

    analyzeBtn.addEventListener('click', async () => {
      const fileInput = document.getElementById('fileInput');
      results.style.display = 'none';
      errorBody.style.display = 'none';

      if (!fileInput.files.length) {
        showBanner('error', 'Please upload a PDF file first.');
        return;
      }

      const formData = new FormData();
      formData.append('file', fileInput.files[0]);
      formData.append('query', document.getElementById('queryInput').value);

      analyzeBtn.disabled = true;
      showBanner('info', 'Analyzing document... Please wait');

      try {
        const res = await fetch('/analyze', { method: 'POST', body: formData });
        const json = await res.json().catch(() => null);

        if (res.status === 200 && json) {
          showBanner('success', 'Analysis Completed');
          document.getElementById('queryUsed').textContent = json.query;
          document.getElementById('fileProcessed').textContent = json.file_processed;
          document.getElementById('analysis').textContent = json.analysis;
          results.style.display = 'block';
        } else {
          showBanner('error', 'Error: ' + res.status);
          errorBody.textContent = JSON.stringify(json, null, 2);
          errorBody.style.display = 'block';
        }
      } catch (err) {
        showBanner('error', 'Connection Error: ' + err);
      } finally {
        analyzeBtn.disabled = false;
      }
    });
  </script>
</body>
</html>"#)
}

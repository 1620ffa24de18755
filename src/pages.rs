use crate::render::DashboardView;

/// Upload page, fully static. The script reads `redirect` and `delay_ms`
/// from the upload ack, so nothing here needs interpolation.
pub const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Student Performance Analyzer</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', Arial, sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 20px; }
        .container { background: white; border-radius: 16px; padding: 40px; max-width: 560px; width: 100%; box-shadow: 0 20px 60px rgba(0, 0, 0, 0.2); }
        h1 { color: #2c3e50; margin-bottom: 8px; font-size: 1.8rem; }
        .subtitle { color: #7f8c8d; margin-bottom: 24px; }
        .upload-area { border: 2px dashed #bdc3c7; border-radius: 12px; padding: 40px 20px; text-align: center; transition: border-color 0.2s, background 0.2s; }
        .upload-area.dragover { border-color: #667eea; background: #f4f6fe; }
        .upload-icon { font-size: 2.5rem; margin-bottom: 12px; }
        .upload-hint { color: #95a5a6; margin: 8px 0; }
        .btn { border: none; border-radius: 8px; padding: 12px 24px; font-size: 1rem; cursor: pointer; }
        .btn-primary { background: #667eea; color: white; }
        .btn-primary:hover { background: #5a6fd6; }
        .btn-primary:disabled { background: #bdc3c7; cursor: not-allowed; }
        .btn-secondary { background: #ecf0f1; color: #2c3e50; }
        .btn-secondary:hover { background: #dfe6e9; }
        .button-group { display: flex; gap: 12px; justify-content: center; margin-top: 24px; }
        .file-name { color: #27ae60; margin-top: 16px; display: none; }
        .file-name.show { display: block; }
        .error-message { background: #fdecea; color: #c0392b; border-radius: 8px; padding: 12px; margin-top: 16px; display: none; }
        .success-message { background: #eafaf1; color: #1e8449; border-radius: 8px; padding: 12px; margin-top: 16px; display: none; }
        .loading-spinner { border: 3px solid #ecf0f1; border-top-color: #667eea; border-radius: 50%; width: 28px; height: 28px; margin: 16px auto 0; animation: spin 0.8s linear infinite; display: none; }
        @keyframes spin { to { transform: rotate(360deg); } }
    </style>
</head>
<body>
    <div class="container">
        <h1>📊 Student Performance Analyzer</h1>
        <p class="subtitle">Upload your quiz attempts CSV to get a personalized analysis and a 7-day study plan.</p>

        <div class="upload-area" id="uploadArea">
            <div class="upload-icon">📁</div>
            <p>Drag &amp; drop your CSV file here</p>
            <p class="upload-hint">or</p>
            <button class="btn btn-primary" id="browseBtn">Browse Files</button>
            <input type="file" id="fileInput" accept=".csv" hidden>
        </div>

        <div class="file-name" id="fileName"></div>
        <div class="error-message" id="errorMessage"></div>
        <div class="success-message" id="successMessage"></div>
        <div class="loading-spinner" id="loadingSpinner"></div>

        <div class="button-group">
            <button class="btn btn-primary" id="analyzeBtn" disabled>Analyze Performance</button>
            <button class="btn btn-secondary" id="sampleBtn">Try Sample Data</button>
        </div>
    </div>

    <script>
        const uploadArea = document.getElementById("uploadArea");
        const fileInput = document.getElementById("fileInput");
        const browseBtn = document.getElementById("browseBtn");
        const analyzeBtn = document.getElementById("analyzeBtn");
        const sampleBtn = document.getElementById("sampleBtn");
        const fileNameDiv = document.getElementById("fileName");
        const loadingSpinner = document.getElementById("loadingSpinner");
        const errorMessage = document.getElementById("errorMessage");
        const successMessage = document.getElementById("successMessage");

        let selectedFile = null;

        browseBtn.addEventListener("click", () => fileInput.click());
        fileInput.addEventListener("change", (e) => handleFileSelect(e.target.files[0]));

        uploadArea.addEventListener("dragover", (e) => {
            e.preventDefault();
            uploadArea.classList.add("dragover");
        });
        uploadArea.addEventListener("dragleave", () => uploadArea.classList.remove("dragover"));
        uploadArea.addEventListener("drop", (e) => {
            e.preventDefault();
            uploadArea.classList.remove("dragover");
            handleFileSelect(e.dataTransfer.files[0]);
        });

        function handleFileSelect(file) {
            if (!file) return;
            if (file.type !== "text/csv" && !file.name.endsWith(".csv")) {
                showError("Please select a valid CSV file");
                return;
            }
            selectedFile = file;
            fileNameDiv.textContent = `✓ File selected: ${file.name}`;
            fileNameDiv.classList.add("show");
            analyzeBtn.disabled = false;
            clearMessages();
        }

        analyzeBtn.addEventListener("click", analyzeFile);
        sampleBtn.addEventListener("click", loadSampleData);

        async function analyzeFile() {
            if (!selectedFile) {
                showError("Please select a file first");
                return;
            }

            const formData = new FormData();
            formData.append("file", selectedFile);

            showLoading(true);
            clearMessages();

            try {
                const response = await fetch("/api/upload", { method: "POST", body: formData });
                const data = await response.json();
                if (!response.ok) {
                    showError(data.error || "Error: Analysis failed");
                    showLoading(false);
                    return;
                }
                showSuccess(data.message);
                setTimeout(() => { window.location.href = data.redirect; }, data.delay_ms);
            } catch (error) {
                showError(`Error: ${error.message}`);
                showLoading(false);
            }
        }

        async function loadSampleData() {
            showLoading(true);
            clearMessages();

            try {
                const response = await fetch("/api/sample");
                const data = await response.json();
                if (!response.ok) {
                    showError(data.error || "Error loading sample data: request failed");
                    showLoading(false);
                    return;
                }
                showSuccess(data.message);
                setTimeout(() => { window.location.href = data.redirect; }, data.delay_ms);
            } catch (error) {
                showError(`Error loading sample data: ${error.message}`);
                showLoading(false);
            }
        }

        function showError(message) {
            errorMessage.textContent = message;
            errorMessage.style.display = "block";
        }

        function showSuccess(message) {
            successMessage.textContent = message;
            successMessage.style.display = "block";
        }

        function showLoading(show) {
            loadingSpinner.style.display = show ? "block" : "none";
            analyzeBtn.disabled = show;
        }

        function clearMessages() {
            errorMessage.style.display = "none";
            successMessage.style.display = "none";
        }
    </script>
</body>
</html>
"#;

const DASHBOARD_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Performance Dashboard - Student Performance Analyzer</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', Arial, sans-serif; background: #f0f2f5; color: #2c3e50; padding: 24px; }
        .container { max-width: 1100px; margin: 0 auto; }
        .dashboard-header { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 12px; margin-bottom: 20px; }
        .dashboard-header h1 { font-size: 1.6rem; }
        .header-actions { display: flex; gap: 10px; }
        .btn { border: none; border-radius: 8px; padding: 10px 18px; font-size: 0.95rem; cursor: pointer; text-decoration: none; display: inline-block; }
        .btn-primary { background: #667eea; color: white; }
        .btn-primary:hover { background: #5a6fd6; }
        .btn-secondary { background: white; color: #2c3e50; border: 1px solid #dfe6e9; }
        .btn-secondary:hover { background: #f8f9fa; }
        .genai-banner { background: white; border-left: 4px solid #667eea; border-radius: 8px; padding: 14px 18px; margin-bottom: 20px; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.06); }
        .genai-banner p { color: #7f8c8d; margin-top: 4px; }
        .stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 16px; margin-bottom: 20px; }
        .stat-card { background: white; border-radius: 12px; padding: 20px; text-align: center; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.06); }
        .stat-number { font-size: 2rem; font-weight: bold; color: #667eea; }
        .stat-caption { color: #7f8c8d; margin-top: 4px; }
        .charts-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 16px; margin-bottom: 20px; }
        .chart-card { background: white; border-radius: 12px; padding: 20px; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.06); }
        .chart-card h3 { margin-bottom: 12px; font-size: 1.05rem; }
        .panel { background: white; border-radius: 12px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.06); }
        .panel h3 { margin-bottom: 14px; }
        .subject-stat { background: #f8f9fa; border-radius: 8px; padding: 14px; margin-bottom: 12px; }
        .subject-stat h4 { margin-bottom: 8px; }
        .stat-row { display: flex; justify-content: space-between; padding: 4px 0; }
        .stat-label { color: #7f8c8d; }
        .stat-value { font-weight: bold; }
        .day-plan { background: #f8f9fa; border-left: 4px solid #667eea; border-radius: 8px; padding: 14px; margin-bottom: 12px; }
        .day-date { color: #7f8c8d; font-size: 0.9rem; margin-bottom: 8px; }
        .day-focus { margin-bottom: 10px; }
        .activities-list { margin-left: 20px; }
        .subject-recommendations { margin-bottom: 16px; }
        .subject-recommendations h4 { margin-bottom: 8px; }
        .resource { background: #f8f9fa; border-radius: 8px; padding: 12px; margin-bottom: 8px; }
        .resource-name { font-weight: bold; }
        .resource-type { color: #667eea; font-size: 0.85rem; }
        .resource-link { color: #3498db; font-size: 0.9rem; word-break: break-all; }
        .tips-card { background: #f8f9fa; border-radius: 8px; padding: 14px; margin-bottom: 12px; }
        .tips-card ul { margin-left: 20px; }
    </style>
</head>
<body>
    <div class="container">
        <header class="dashboard-header">
            <h1>📊 Performance Dashboard</h1>
            <div class="header-actions">
                <a href="/back" class="btn btn-secondary">← Back to Upload</a>
                <a href="/api/plan/export" class="btn btn-secondary">⬇ Download Plan</a>
                <button class="btn btn-primary" onclick="exportToPDF()">Export PDF</button>
            </div>
        </header>
"#;

const DASHBOARD_SCRIPT: &str = r#"    <script>
        const configs = JSON.parse(document.getElementById("chart-data").textContent);

        function withSuffix(config) {
            const ticks = config.options && config.options.scales && config.options.scales.y
                ? config.options.scales.y.ticks
                : null;
            if (ticks && ticks.suffix) {
                const unit = ticks.suffix;
                ticks.callback = (value) => value + unit;
                delete ticks.suffix;
            }
            return config;
        }

        new Chart(document.getElementById("accuracyChart"), withSuffix(configs.accuracy));
        new Chart(document.getElementById("timeChart"), withSuffix(configs.time));
        new Chart(document.getElementById("strengthChart"), withSuffix(configs.strength));

        function exportToPDF() {
            alert("PDF export feature coming soon! For now, use your browser's print function (Ctrl+P) to save as PDF.");
        }
    </script>
</body>
</html>
"#;

/// Renders the dashboard page around an already-built view. All dynamic
/// pieces are escaped fragments, so the templates below stay plain HTML.
pub fn dashboard_page(view: &DashboardView) -> String {
    let mut page = String::with_capacity(32 * 1024);
    page.push_str(DASHBOARD_HEAD);

    page.push_str(&format!(
        r#"        <section class="genai-banner">
            <h3 id="genaiStatusTitle">{}</h3>
            <p id="genaiStatusMessage">{}</p>
        </section>
"#,
        view.genai_title, view.genai_message
    ));

    page.push_str(&format!(
        r#"        <section class="stats-grid">
            <div class="stat-card"><div class="stat-number" id="totalAttempts">{}</div><div class="stat-caption">Total Attempts</div></div>
            <div class="stat-card"><div class="stat-number" id="overallAccuracy">{}</div><div class="stat-caption">Overall Accuracy</div></div>
            <div class="stat-card"><div class="stat-number" id="strengthLevel">{}</div><div class="stat-caption">Strength Level</div></div>
        </section>
"#,
        view.total_attempts, view.overall_accuracy, view.strength_level
    ));

    page.push_str(
        r#"        <section class="charts-grid">
            <div class="chart-card"><h3>Accuracy by Difficulty</h3><canvas id="accuracyChart"></canvas></div>
            <div class="chart-card"><h3>Time: Correct vs Incorrect</h3><canvas id="timeChart"></canvas></div>
            <div class="chart-card"><h3>Strength Progression</h3><canvas id="strengthChart"></canvas></div>
        </section>
"#,
    );

    push_panel(&mut page, "Detailed Analysis", "summaryDetails", &view.summary_details);
    push_panel(&mut page, "Subtopic Ranking", "subtopicRanking", &view.subtopic_ranking);
    page.push_str(&format!(
        r#"        <section class="panel"><h3>Revision Summary</h3><p id="revisionSummaryText">{}</p></section>
"#,
        view.revision_summary
    ));
    push_panel(&mut page, "7-Day Study Plan", "studyPlan", &view.study_plan);
    push_panel(&mut page, "Recommended Resources", "recommendations", &view.recommendations);
    push_panel(&mut page, "Study Tips", "studyTips", &view.study_tips);

    page.push_str("    </div>\n");
    page.push_str(r#"    <script id="chart-data" type="application/json">"#);
    page.push_str(&escape_script(&view.charts_json));
    page.push_str("</script>\n");
    page.push_str(DASHBOARD_SCRIPT);
    page
}

fn push_panel(page: &mut String, title: &str, id: &str, body: &str) {
    page.push_str(&format!(
        r#"        <section class="panel"><h3>{title}</h3><div id="{id}">{body}</div></section>
"#,
    ));
}

/// Keeps embedded JSON from terminating its script element early. The
/// escaped form is still valid JSON.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

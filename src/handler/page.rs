//! HTML rendering for the prediction form.
use crate::classification::Verdict;
use crate::classification::decision::Label;

pub const SAMPLE_REAL: &str = "The United Nations said on Tuesday that global food prices declined slightly in June, driven by lower cereal and vegetable oil costs, according to a report released by the Food and Agriculture Organization.";
pub const SAMPLE_FAKE: &str = "Shocking secret revealed! Government hiding truth from citizens!!!";

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Fake News Detection</title>
    <style>
        body {
            font-family: 'Inter', sans-serif;
            background: linear-gradient(135deg, #667eea, #764ba2);
            margin: 0;
            padding: 0;
        }
        .container {
            max-width: 900px;
            margin: 60px auto;
            background: white;
            padding: 40px;
            border-radius: 18px;
            box-shadow: 0 25px 50px rgba(0,0,0,0.25);
        }
        h1 { text-align: center; margin-bottom: 8px; }
        .subtitle { text-align: center; color: #555; margin-bottom: 30px; }
        textarea {
            width: 100%;
            height: 170px;
            padding: 15px;
            border-radius: 12px;
            border: 1px solid #ccc;
            font-size: 15px;
            resize: none;
            box-sizing: border-box;
        }
        .actions, .examples { text-align: center; margin-top: 20px; }
        button {
            background: #667eea;
            color: white;
            padding: 14px 30px;
            border: none;
            border-radius: 12px;
            font-size: 16px;
            cursor: pointer;
        }
        .examples button {
            background: #e2e8f0;
            color: #333;
            margin: 5px;
            padding: 8px 14px;
            font-size: 13px;
        }
        .result-box { margin-top: 35px; padding: 25px; border-radius: 14px; background: #f8f9fc; }
        .real { color: #28a745; font-weight: 700; }
        .fake { color: #dc3545; font-weight: 700; }
        .uncertain { color: #d97706; font-weight: 700; }
        .progress { height: 12px; background: #e0e0e0; border-radius: 10px; overflow: hidden; margin-top: 10px; }
        .progress-bar { height: 100%; border-radius: 10px; }
        .footer { text-align: center; font-size: 12px; color: #777; margin-top: 30px; }
    </style>
    <script>
        function fillExample(id) {
            document.getElementById("news").value = document.getElementById(id).textContent;
        }
    </script>
</head>
<body>
<div class="container">
    <h1>Fake News Detection</h1>
    <p class="subtitle">Identify misleading or false news content</p>

    <form method="post" action="/">
        <textarea id="news" name="news" placeholder="Paste the news article text here..." required>__NEWS__</textarea>
        <div class="actions">
            <button type="submit">Analyze News</button>
        </div>
    </form>

    <div class="examples">
        <p><b>Try an example:</b></p>
        <template id="sample-real">__SAMPLE_REAL__</template>
        <template id="sample-fake">__SAMPLE_FAKE__</template>
        <button type="button" onclick="fillExample('sample-real')">Sample REAL</button>
        <button type="button" onclick="fillExample('sample-fake')">Sample FAKE</button>
    </div>
__RESULT__
    <div class="footer">Your text is classified in memory and not stored</div>
</div>
</body>
</html>
"##;

/// Renders the form, echoing the submitted text and the verdict when present.
#[must_use]
pub fn render_page(submitted: Option<&str>, verdict: Option<&Verdict>) -> String {
    PAGE_TEMPLATE
        .replace("__SAMPLE_REAL__", &ammonia::clean_text(SAMPLE_REAL))
        .replace("__SAMPLE_FAKE__", &ammonia::clean_text(SAMPLE_FAKE))
        .replace("__RESULT__", &verdict.map(render_result).unwrap_or_default())
        .replace("__NEWS__", &ammonia::clean_text(submitted.unwrap_or_default()))
}

fn render_result(verdict: &Verdict) -> String {
    let (class, marker, color) = match verdict.label {
        Label::Real => ("real", "&#10004;", "#28a745"),
        Label::Fake => ("fake", "&#10006;", "#dc3545"),
        Label::Uncertain => ("uncertain", "?", "#d97706"),
    };
    format!(
        r#"    <div class="result-box">
        <h2>Prediction: <span class="{class}">{marker} {label}</span></h2>
        <p>Confidence Level: <b>{confidence:.2}%</b></p>
        <div class="progress">
            <div class="progress-bar" style="width: {confidence:.2}%; background: {color};"></div>
        </div>
    </div>
"#,
        label = verdict.label,
        confidence = verdict.confidence_pct,
    )
}

//! HTML rendering of a memory book.

use super::memory_book::{MemoryBook, MemoryPage};

const STYLE: &str = r"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      line-height: 1.6;
      color: #333;
      padding: 20px;
      max-width: 800px;
      margin: 0 auto;
      background: #f5f5f5;
    }
    .header {
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
      padding: 40px 20px;
      text-align: center;
      border-radius: 10px;
      margin-bottom: 30px;
    }
    .header h1 { font-size: 2.5em; margin-bottom: 10px; }
    .welcome, .postit {
      background: white;
      padding: 25px;
      margin-bottom: 30px;
      border-radius: 10px;
      box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    }
    .postit { border-left: 5px solid; page-break-inside: avoid; }
    .postit-header { font-size: 1.2em; font-weight: bold; margin-bottom: 15px; }
    .prompt { font-size: 1.1em; margin-bottom: 15px; color: #555; }
    .answer {
      background: #f9f9f9;
      padding: 15px;
      border-radius: 5px;
      margin: 15px 0;
      border-left: 3px solid #667eea;
    }
    .answer-label { font-weight: bold; color: #667eea; margin-bottom: 5px; }
    .skipped { color: #999; font-style: italic; }
    .photos {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 15px;
      margin-top: 15px;
    }
    .photo { width: 100%; border-radius: 5px; }
    .option { background: #e8f0fe; padding: 10px; border-radius: 5px; display: inline-block; }
    @media print { body { background: white; padding: 0; } }
";

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Maps a post-it color name to its hex value; unknown names pass through.
#[must_use]
pub fn color_hex(color: &str) -> String {
    let hex = match color.to_lowercase().as_str() {
        "" | "yellow" => "#ffeb3b",
        "red" => "#f44336",
        "blue" => "#2196f3",
        "green" => "#4caf50",
        "pink" => "#e91e63",
        "orange" => "#ff9800",
        "purple" => "#9c27b0",
        _ => return color.to_owned(),
    };
    hex.to_owned()
}

fn append_head(out: &mut String) {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str("  <title>Scavenger Hunt Memory Book</title>\n");
    out.push_str(&format!("  <style>{STYLE}  </style>\n"));
    out.push_str("</head>\n");
}

fn append_intro(out: &mut String, book: &MemoryBook) {
    out.push_str("  <div class=\"header\">\n    <h1>Scavenger Hunt Memory Book</h1>\n");
    out.push_str(&format!(
        "    <p>For {}</p>\n  </div>\n",
        escape_html(&book.gifted_name)
    ));
    out.push_str("  <div class=\"welcome\">\n    <h2>Welcome!</h2>\n");
    out.push_str(&format!(
        "    <p>{}</p>\n  </div>\n",
        escape_html(&book.welcome_message)
    ));
}

fn append_page(out: &mut String, page: &MemoryPage) {
    let submission = &page.submission;
    out.push_str(&format!(
        "  <div class=\"postit\" style=\"border-left-color: {};\">\n",
        escape_html(&color_hex(&page.post_it.color))
    ));
    out.push_str(&format!(
        "    <div class=\"postit-header\">{}</div>\n",
        escape_html(&page.heading())
    ));
    out.push_str(&format!(
        "    <div class=\"prompt\">{}</div>\n",
        escape_html(&page.post_it.prompt)
    ));

    if submission.was_skipped {
        out.push_str("    <div class=\"answer skipped\">Skipped</div>\n");
    } else {
        if let Some(value) = submission.selected_option_value.as_deref().filter(|v| !v.is_empty()) {
            out.push_str("    <div class=\"answer\">\n");
            out.push_str("      <div class=\"answer-label\">Selected Option:</div>\n");
            out.push_str(&format!(
                "      <div class=\"option\">{}</div>\n    </div>\n",
                escape_html(value)
            ));
        }
        if let Some(answer) = submission.text_answer.as_deref().filter(|a| !a.is_empty()) {
            out.push_str("    <div class=\"answer\">\n");
            out.push_str("      <div class=\"answer-label\">Answer:</div>\n");
            out.push_str(&format!(
                "      <div>{}</div>\n    </div>\n",
                escape_html(answer)
            ));
        }
        if !submission.photos.is_empty() {
            out.push_str("    <div class=\"photos\">\n");
            for photo in &submission.photos {
                out.push_str(&format!(
                    "      <img src=\"{}\" alt=\"Photo\" class=\"photo\" />\n",
                    escape_html(&photo.photo_url)
                ));
            }
            out.push_str("    </div>\n");
        }
    }

    out.push_str("  </div>\n");
}

/// Renders the memory book as a standalone HTML document.
#[must_use]
pub fn render_html(book: &MemoryBook) -> String {
    let mut out = String::new();
    append_head(&mut out);
    out.push_str("<body>\n");
    append_intro(&mut out, book);
    for page in &book.pages {
        append_page(&mut out, page);
    }
    out.push_str("</body>\n</html>\n");
    out
}

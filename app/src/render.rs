use pdf_query_client::{QaEntry, QueryPhase, SessionSnapshot, UploadPhase};

/// Renders the session the way the page laid it out: upload status, the
/// error line, the current answer and then the earlier questions.
pub fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let upload = &snapshot.upload;

    match (&upload.selected_file, upload.phase) {
        (_, UploadPhase::Uploading) => out.push_str("Uploading PDF...\n"),
        (Some(file), _) => out.push_str(&format!("Selected: {}\n", file.name)),
        (None, _) => {}
    }
    if !upload.status_message.is_empty() {
        out.push_str(&format!("{}\n", upload.status_message));
    }

    if let Some(error) = snapshot.error_message() {
        out.push_str(&format!("Error: {}\n", error));
    }

    if snapshot.query.phase == QueryPhase::Submitting {
        out.push_str("Thinking...\n");
    }

    let view = snapshot.conversation();
    if let Some(current) = &view.current {
        out.push_str("\nAnswer\n");
        push_entry(&mut out, current);
    }

    if view.has_history() {
        out.push_str("\nPrevious Questions & Answers\n");
        for entry in &view.previous {
            push_entry(&mut out, entry);
        }
    }

    out
}

fn push_entry(out: &mut String, entry: &QaEntry) {
    out.push_str(&format!("Q: {}\nA: {}\n", entry.query, entry.answer));
}

use crate::recognition::domain::recognition_result::{Identity, RecognitionOutcome};

/// Visual cue shown next to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Warning,
    Success,
}

impl StatusIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusIndicator::Warning => "[!]",
            StatusIndicator::Success => "[✓]",
        }
    }

    fn text_class(&self) -> &'static str {
        match self {
            StatusIndicator::Warning => "text-warning",
            StatusIndicator::Success => "text-success",
        }
    }

    fn icon_class(&self) -> &'static str {
        match self {
            StatusIndicator::Warning => "fa-exclamation-circle",
            StatusIndicator::Success => "fa-check-circle",
        }
    }

    fn badge_class(&self) -> &'static str {
        match self {
            StatusIndicator::Warning => "badge bg-warning text-dark",
            StatusIndicator::Success => "badge bg-success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    pub name: String,
    pub roll_no: String,
    pub time: String,
}

/// One line of the attendance log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceEntry {
    AlreadyMarked(EntryDetails),
    MarkedPresent(EntryDetails),
}

impl AttendanceEntry {
    pub fn new(identity: &Identity, duplicate: bool, time: &str) -> Self {
        let details = EntryDetails {
            name: identity.name.clone(),
            roll_no: identity.roll_no.clone(),
            time: time.to_string(),
        };
        if duplicate {
            AttendanceEntry::AlreadyMarked(details)
        } else {
            AttendanceEntry::MarkedPresent(details)
        }
    }

    /// `None` for failed recognitions; those never reach the log.
    pub fn from_outcome(outcome: &RecognitionOutcome, time: &str) -> Option<Self> {
        match outcome {
            RecognitionOutcome::FirstMatch(identity) => Some(Self::new(identity, false, time)),
            RecognitionOutcome::Duplicate(identity) => Some(Self::new(identity, true, time)),
            RecognitionOutcome::Failed(_) => None,
        }
    }

    pub fn details(&self) -> &EntryDetails {
        match self {
            AttendanceEntry::AlreadyMarked(d) | AttendanceEntry::MarkedPresent(d) => d,
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            AttendanceEntry::AlreadyMarked(_) => "Already marked present",
            AttendanceEntry::MarkedPresent(_) => "Marked present",
        }
    }

    pub fn indicator(&self) -> StatusIndicator {
        match self {
            AttendanceEntry::AlreadyMarked(_) => StatusIndicator::Warning,
            AttendanceEntry::MarkedPresent(_) => StatusIndicator::Success,
        }
    }

    pub fn render_text(&self) -> String {
        let d = self.details();
        format!(
            "{} {} ({}) {} - {}",
            self.indicator().symbol(),
            d.name,
            d.roll_no,
            d.time,
            self.status_text()
        )
    }

    /// Detached `list-group-item` fragment for a web log container.
    pub fn render_html(&self) -> String {
        let d = self.details();
        let indicator = self.indicator();
        format!(
            r#"<div class="list-group-item">
    <div class="d-flex justify-content-between align-items-center">
        <div>
            <span class="status-icon {text_class}">
                <i class="fas {icon_class}"></i>
            </span>
            <strong>{name}</strong> ({roll_no})
        </div>
        <span class="{badge_class}">{time}</span>
    </div>
    <small class="text-muted">{status}</small>
</div>
"#,
            text_class = indicator.text_class(),
            icon_class = indicator.icon_class(),
            badge_class = indicator.badge_class(),
            name = escape_html(&d.name),
            roll_no = escape_html(&d.roll_no),
            time = escape_html(&d.time),
            status = self.status_text(),
        )
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//! Plain-text complaint form.

use rust_decimal::Decimal;
use std::fmt::Write;
use std::str::FromStr;

use crate::domain::complaint::Complaint;
use crate::domain::foundation::ComplaintId;

const FOOTER: &str =
    "This is a computer-generated document for cyber crime complaint registration.";

/// Renders the complaint as a markdown form.
pub fn render_complaint_form(id: &ComplaintId, complaint: &Complaint) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# CYBER CRIME COMPLAINT FORM\n");
    let _ = writeln!(out, "Complaint ID: {}\n", id);

    let _ = writeln!(out, "## 1. PERSONAL INFORMATION\n");
    for (serial, label, value) in [
        ("1", "Name", &complaint.name),
        ("2", "Mobile Number", &complaint.mobile_no),
        ("3", "Date of Birth", &complaint.dob),
        ("4", "Father's Name", &complaint.father_name),
        ("5", "District", &complaint.district),
        ("6", "PIN Code", &complaint.pin_code),
    ] {
        let _ = writeln!(out, "{}. {}: {}", serial, label, value);
    }

    let _ = writeln!(out, "\n## 2. TRANSACTION DETAILS");
    for (index, t) in complaint.transactions.iter().enumerate() {
        let n = index + 1;
        let _ = writeln!(out, "\n### Transaction #{}\n", n);
        for (ordinal, label, value) in [
            (1, "Date", &t.date),
            (2, "Time", &t.time),
            (3, "Bank Name", &t.bank_name),
            (4, "Account Number", &t.account_no),
            (5, "Amount", &t.amount),
            (6, "Transaction ID", &t.transaction_id),
        ] {
            let _ = writeln!(out, "2.{}.{} {}: {}", n, ordinal, label, value);
        }
    }

    if let Some(total) = total_amount(complaint) {
        let _ = writeln!(out, "\nTotal amount lost: ₹{}", total);
    }

    let generated = complaint.submitted_at.as_datetime().format("%d-%m-%Y %H:%M:%S");
    let _ = writeln!(out, "\n---\nGenerated on: {} UTC\n{}", generated, FOOTER);
    out
}

/// Sum of the normalized `₹` amounts, if every one parses.
fn total_amount(complaint: &Complaint) -> Option<Decimal> {
    complaint
        .transactions
        .iter()
        .map(|t| Decimal::from_str(t.amount.trim_start_matches('₹')).ok())
        .sum::<Option<Decimal>>()
        .map(|total| total.round_dp(2))
}

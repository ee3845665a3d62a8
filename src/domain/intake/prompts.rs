//! Reply texts.
//!
//! Everything the user reads comes from here. Texts use the messaging
//! channel's lightweight markup (`*bold*`, `_italic_`).

use std::fmt::Write;

use crate::domain::foundation::ComplaintId;

use super::address::SerialAddress;
use super::collected::CollectedData;
use super::field::{PersonalField, TransactionField};

pub const PORTAL_URL: &str = "https://cybercrime.gov.in";

const NOT_AVAILABLE: &str = "N/A";

const EDIT_EXAMPLES: &str = "• 1 = JOHN SMITH\n\
                             • 3 = 01-01-1995\n\
                             • 2.1.2 = 02:03 PM\n\
                             • 2.1.4 = 123456789012\n\
                             • 2.1.6 = TXN1234567890";

pub fn greeting() -> String {
    "👋 Hello! Welcome to Cyber Crime Complaint Registration Bot.\n\n\
     Have you suffered a *money loss* due to cyber crime?\n\n\
     Reply:\n1️⃣ *Yes* - Register a complaint\n2️⃣ *No* - Track existing complaint"
        .to_string()
}

pub fn money_loss_reprompt() -> String {
    "Please reply with *Yes* or *No*.\n\n\
     Have you suffered a money loss due to cyber crime?"
        .to_string()
}

pub fn redirect() -> String {
    format!(
        "To track your complaint, please visit the official NCRP website:\n\n\
         🔗 {}\n\n\
         Type 'Hi' anytime to start a new complaint registration.",
        PORTAL_URL
    )
}

pub fn personal_intro(first_prompt: &str) -> String {
    format!(
        "Let's register your complaint. I'll collect some information from you.\n\n\
         📝 *Personal Information*\n\n{}",
        first_prompt
    )
}

pub fn transaction_count_prompt() -> String {
    "💳 *Transaction Details*\n\n\
     How many *fraudulent transactions* were made?\n\
     _Enter a number (e.g., 2)_"
        .to_string()
}

/// Header shown when transaction `number` (1-based) begins.
pub fn transaction_header(number: usize, first_prompt: &str) -> String {
    format!("📝 *Transaction #{}*\n\n{}", number, first_prompt)
}

pub fn rejection(reason: &str, prompt: &str) -> String {
    format!("❌ {}\n\n{}", reason, prompt)
}

/// Every collected value with its serial address.
pub fn summary(data: &CollectedData) -> String {
    let mut out = String::from("📋 *SUMMARY OF YOUR COMPLAINT*\n\n👤 *PERSONAL INFORMATION:*\n");
    for field in PersonalField::ALL {
        let _ = writeln!(
            out,
            "{} {}: {}",
            SerialAddress::Personal(field),
            field.descriptor().label,
            data.personal(field).unwrap_or(NOT_AVAILABLE)
        );
    }

    out.push_str("\n💳 *TRANSACTION DETAILS:*\n");
    for (index, record) in data.transactions().iter().enumerate() {
        let transaction = index + 1;
        let _ = writeln!(out, "\n📌 Transaction #{}:", transaction);
        for field in TransactionField::ALL {
            let _ = writeln!(
                out,
                "{} {}: {}",
                SerialAddress::Transaction { transaction, field },
                field.descriptor().label,
                record.get(field).unwrap_or(NOT_AVAILABLE)
            );
        }
    }
    out
}

pub fn confirm_question() -> String {
    "📋 Do you want to generate the complaint document or edit information?\n\n\
     Reply:\n*Yes* - to generate document\n*No* - to edit information"
        .to_string()
}

pub fn confirm_reprompt() -> String {
    "Please reply with *Yes* to generate the document or *No* to edit information.".to_string()
}

pub fn updated_confirm_question() -> String {
    "Generate the complaint document with updated data?\n\n\
     Reply:\n*Yes* - to generate document\n*No* - to edit more"
        .to_string()
}

pub fn edit_instructions() -> String {
    format!(
        "✏️ *EDIT YOUR INFORMATION*\n\n\
         Use format: *serial_number = new_value*\n\n\
         *Examples of Editing:*\n{}\n\n\
         Type *'done'* when finished\n\
         Type *'summary'* to view all data",
        EDIT_EXAMPLES
    )
}

/// Footer appended to the summary while editing.
pub fn edit_footer() -> String {
    "*To edit:* type serial_number = new_value\n\
     Examples: 1 = New Name or 2.1.2 = 02:03 PM\n\
     Type 'done' when finished"
        .to_string()
}

pub fn field_updated(address: &SerialAddress, value: &str) -> String {
    format!(
        "✅ Field {} updated: {}\n\n\
         Continue editing or type 'done' to finish.\n\
         Type 'summary' to review all data.",
        address, value
    )
}

pub fn edit_error(reason: &str) -> String {
    format!(
        "❌ {}\n\nFormat: *serial_number = new_value*\nExamples:\n{}",
        reason, EDIT_EXAMPLES
    )
}

pub fn malformed_edit() -> String {
    format!(
        "❌ Invalid format!\n\n\
         Use: *serial_number = new_value*\n\n\
         *Examples:*\n{}\n\n\
         Type 'done' when finished",
        EDIT_EXAMPLES
    )
}

pub fn success(complaint_id: &ComplaintId) -> String {
    format!(
        "✅ *DATA COLLECTED SUCCESSFULLY!*\n\n\
         📋 Complaint ID: *{}*\n\n\
         📞 For further assistance:\n🔗 {}\n\n\
         Thank you for using our service! Stay safe online! 🛡️\n\n\
         _Type 'Hi' to register a new complaint._",
        complaint_id, PORTAL_URL
    )
}

pub fn delivery_fallback(complaint_id: &ComplaintId) -> String {
    format!(
        "✅ Complaint registered with ID: {}\n\n\
         ⚠️ The complaint document could not be sent. Please contact support.",
        complaint_id
    )
}

pub fn materialize_failed() -> String {
    "⚠️ We could not register your complaint right now. Your details are saved.\n\n\
     Reply *Yes* to try again."
        .to_string()
}

pub fn already_registered() -> String {
    "✅ Your complaint has already been registered.\n\n\
     _Type 'Hi' to register a new complaint._"
        .to_string()
}

pub fn abandoned() -> String {
    "Your complaint registration has been cancelled. No details were saved.\n\n\
     Type 'Hi' anytime to start again."
        .to_string()
}

pub fn generating() -> String {
    "✅ Generating your complaint document...".to_string()
}

pub fn something_went_wrong() -> String {
    "Something went wrong. Please type 'Hi' to restart.".to_string()
}

pub fn session_timed_out() -> String {
    "Due to inactivity on the channel, your session has timed out.".to_string()
}

pub fn session_unreadable() -> String {
    "We could not resume your previous session, so it has been reset.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_every_field_with_its_address() {
        let mut data = CollectedData::new();
        data.set_personal(PersonalField::Name, "Asha Rao".into());
        data.set_transaction_value(0, TransactionField::Date, "01-06-2025".into());
        data.set_transaction_value(1, TransactionField::TransactionId, "TXN12345678".into());

        let text = summary(&data);
        assert!(text.contains("1 Name: Asha Rao\n"));
        assert!(text.contains("2 Mobile: N/A\n"));
        assert!(text.contains("6 PIN Code: N/A\n"));
        assert!(text.contains("📌 Transaction #1:\n2.1.1 Date: 01-06-2025\n"));
        assert!(text.contains("2.2.6 Trans ID: TXN12345678\n"));
        assert!(!text.contains("2.3."));
    }

    #[test]
    fn unreadable_notice_differs_from_timeout() {
        assert_ne!(session_unreadable(), session_timed_out());
        assert!(session_unreadable().contains("reset"));
    }

    #[test]
    fn rejection_shows_reason_then_prompt() {
        assert_eq!(
            rejection("Too short", "Enter name:"),
            "❌ Too short\n\nEnter name:"
        );
    }

    #[test]
    fn completion_texts_carry_the_id() {
        let id = ComplaintId::new();
        assert!(success(&id).contains(&id.to_string()));
        assert!(delivery_fallback(&id).contains(&id.to_string()));
    }

    #[test]
    fn redirect_points_to_portal() {
        assert!(redirect().contains(PORTAL_URL));
    }
}

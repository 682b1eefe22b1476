//! Plain-text email templates.

use qna_db::models::answer::Answer;
use qna_db::models::question::Question;
use qna_db::models::user::Recipient;

/// A rendered email ready for a [`Mailer`](crate::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Tell a subscriber that `question` received `answer`.
pub fn answer_notification(recipient: &Recipient, question: &Question, answer: &Answer) -> Email {
    Email {
        to: recipient.email.clone(),
        subject: format!("New answer to \"{}\"", question.title),
        body: format!(
            "Hello {name},\n\n\
             A new answer was posted to the question \"{title}\" you are subscribed to:\n\n\
             {body}\n",
            name = recipient.name,
            title = question.title,
            body = answer.body,
        ),
    }
}

/// Daily summary of the questions created in the last 24 hours.
pub fn digest(recipient: &Recipient, questions: &[Question]) -> Email {
    let mut body = format!("Hello {},\n\n", recipient.name);
    if questions.is_empty() {
        body.push_str("No new questions were asked in the last 24 hours.\n");
    } else {
        body.push_str("Questions asked in the last 24 hours:\n\n");
        for question in questions {
            body.push_str(&format!("- {}\n", question.title));
        }
    }

    Email {
        to: recipient.email.clone(),
        subject: "Daily digest".to_string(),
        body,
    }
}

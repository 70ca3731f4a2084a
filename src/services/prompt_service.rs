use crate::models::email_request::EmailRequest;

/// Builds the reply-generation prompt for an email.
pub fn build_prompt(request: &EmailRequest) -> String {
    let mut prompt = String::new();
    prompt.push_str("Generate a professional email reply for the following email. ");
    prompt.push_str("Do not generate a subject line. ");

    if let Some(tone) = request.tone() {
        prompt.push_str(&format!("Use a {} tone. ", tone));
    }

    prompt.push_str("\n\nOriginal email:\n");
    prompt.push_str(&request.email_content);
    prompt
}

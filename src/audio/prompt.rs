use crate::llm::{AskOptions, ChatMessage};

pub const SUMMARY_OPTIONS: AskOptions = AskOptions {
    temperature: Some(0.3),
    max_tokens: Some(1000),
};
pub const DURATION_OPTIONS: AskOptions = AskOptions {
    temperature: Some(0.1),
    max_tokens: Some(50),
};
pub const TOPICS_OPTIONS: AskOptions = AskOptions {
    temperature: Some(0.2),
    max_tokens: Some(500),
};

pub fn summary_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a helpful assistant that creates clear, concise summaries of spoken content.",
        ),
        ChatMessage::user(format!(
            "Please provide a clear and concise summary of the following transcript.\n\
             Focus on the main points, key topics discussed, and important takeaways.\n\
             Keep the summary well-structured and easy to read.\n\n\
             Transcript:\n{transcript}"
        )),
    ]
}

pub fn duration_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are an expert at estimating speech duration from transcripts. Return only the estimated duration in minutes as a number.",
        ),
        ChatMessage::user(format!(
            "Based on this transcript, please estimate how long the audio recording was in minutes.\n\
             Consider typical speaking pace and content density. Return only a number (the duration in minutes).\n\n\
             Transcript:\n{transcript}"
        )),
    ]
}

pub fn topics_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are an expert at analyzing text and extracting key topics. Always return valid JSON format.",
        ),
        ChatMessage::user(format!(
            "Analyze the following transcript and identify the most frequently mentioned topics or themes.\n\
             Return your response as a JSON array of objects, where each object has \"topic\" and \"mentions\" fields.\n\
             Focus on the top 5 most important topics. Count how many times each topic or related concepts are mentioned.\n\n\
             Format your response as valid JSON only, like this example:\n\
             [\n    \
             {{\"topic\": \"Customer Service\", \"mentions\": 8}},\n    \
             {{\"topic\": \"Product Development\", \"mentions\": 5}},\n    \
             {{\"topic\": \"Budget Planning\", \"mentions\": 3}}\n\
             ]\n\n\
             Transcript:\n{transcript}"
        )),
    ]
}

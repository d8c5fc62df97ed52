use crate::llm::{AskOptions, ChatMessage};

pub const REPORT_OPTIONS: AskOptions = AskOptions {
    temperature: Some(0.7),
    max_tokens: Some(2000),
};

pub const SYSTEM_MESSAGE: &str = "You are a professional service analyst who creates detailed, structured reports about digital services and platforms.";

/// Section headings every report must carry, in order.
pub const REPORT_SECTIONS: [&str; 8] = [
    "Brief History",
    "Target Audience",
    "Core Features",
    "Unique Selling Points",
    "Business Model",
    "Tech Stack Insights",
    "Perceived Strengths",
    "Perceived Weaknesses",
];

/// How the input text should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// A well-known service name; the model may rely on what it knows.
    KnownService,
    /// A free-text description; the model should infer what is missing.
    Description,
}

const FEW_SHOT_EXAMPLES: &str = r#"
Example Analysis 1:
Input: "Spotify"
Output:
# Service Analysis Report: Spotify

## Brief History
Founded in 2006 by Daniel Ek and Martin Lorentzon in Stockholm, Sweden. Launched publicly in 2008. Key milestones include reaching 1 million users in 2009, launching in the US in 2011, going public in 2018, and surpassing 500 million users by 2023.

## Target Audience
- Music enthusiasts aged 18-34 (primary demographic)
- Premium subscribers seeking ad-free experience
- Podcast listeners and creators
- Artists and musicians looking for distribution platform

## Core Features
- Music streaming with 100+ million tracks
- Personalized playlists and recommendations
- Podcast hosting and discovery
- Social sharing and collaborative playlists

## Unique Selling Points
- Discover Weekly and algorithm-driven personalization
- Freemium model with robust free tier
- Strong podcast ecosystem integration
- Cross-platform synchronization

## Business Model
- Freemium subscription model (free with ads, premium ad-free)
- Premium subscriptions ($9.99/month individual, family plans)
- Spotify for Artists platform
- Advertising revenue from free tier users

## Tech Stack Insights
- Backend: Java, Python, Node.js
- Data processing: Apache Kafka, Apache Storm
- Machine learning: TensorFlow, proprietary recommendation algorithms
- Infrastructure: Google Cloud Platform, AWS

## Perceived Strengths
- Excellent music discovery algorithms
- User-friendly interface across platforms
- Strong brand recognition and market presence
- Robust free tier attracts users

## Perceived Weaknesses
- Low artist payouts controversy
- Limited high-fidelity audio options
- Dependence on music licensing deals
- Competition from Apple Music, YouTube Music

---

Example Analysis 2:
Input: "Our platform connects freelance developers with startups who need technical expertise. We use AI matching to pair the right talent with projects based on skills, experience, and budget. Developers can showcase portfolios while companies post detailed project requirements."

Output:
# Service Analysis Report: Freelance Developer Platform

## Brief History
Appears to be a contemporary platform leveraging AI for talent matching. Based on description, likely founded in the 2020s during the remote work boom, capitalizing on the gig economy and AI advancement trends.

## Target Audience
- Freelance developers seeking project opportunities
- Startups and small businesses needing technical talent
- Companies looking for cost-effective development solutions
- Remote-first organizations

## Core Features
- AI-powered talent matching system
- Developer portfolio showcasing
- Project requirement posting system
- Skills and experience assessment tools

## Unique Selling Points
- AI-driven matching algorithm for better fit
- Focus on developer-startup ecosystem
- Portfolio-centric approach for talent showcase
- Budget-aware matching system

## Business Model
- Likely commission-based (percentage of project value)
- Possible subscription tiers for enhanced features
- Premium listings for higher visibility
- Transaction fees on completed projects

## Tech Stack Insights
- Machine learning for matching algorithms
- Web application (likely React/Vue.js frontend)
- Database for user profiles and projects
- Payment processing integration
- Possibly cloud-based infrastructure

## Perceived Strengths
- AI matching reduces manual searching time
- Specialized focus on developer-startup niche
- Portfolio integration for better talent assessment
- Budget consideration in matching process

## Perceived Weaknesses
- Dependent on network effects for success
- Competition from established platforms (Upwork, Fiverr)
- Need for quality control in matches
- Potential for AI bias in matching algorithms
"#;

/// User prompt for one analysis.
pub fn analysis_prompt(input: &str, mode: AnalysisMode) -> String {
    let section_count = REPORT_SECTIONS.len();
    match mode {
        AnalysisMode::KnownService => format!(
            "You are an expert service analyst. Analyze the following well-known service and create a comprehensive report. Use your knowledge about this service to provide accurate, detailed information.\n\
             {FEW_SHOT_EXAMPLES}\n\
             Now analyze this service:\n\
             Input: \"{input}\"\n\n\
             Generate a comprehensive analysis report following the exact same markdown format as the examples above. Include all {section_count} sections with detailed, accurate information."
        ),
        AnalysisMode::Description => format!(
            "You are an expert service analyst. Analyze the following service description and create a comprehensive report. Extract insights and make reasonable inferences about the service based on the description provided.\n\
             {FEW_SHOT_EXAMPLES}\n\
             Now analyze this service description:\n\
             Input: \"{input}\"\n\n\
             Generate a comprehensive analysis report following the exact same markdown format as the examples above. Include all {section_count} sections with detailed analysis based on the description provided. Make reasonable inferences where direct information isn't available."
        ),
    }
}

pub fn messages(input: &str, mode: AnalysisMode) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_MESSAGE),
        ChatMessage::user(analysis_prompt(input, mode)),
    ]
}

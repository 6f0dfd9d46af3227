/// Services a caller can pick when booking a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Service {
    BusinessOptimization,
    Assistants,
    WebDevelopment,
    ContentGeneration,
    CustomAgents,
    Consulting,
    GeneralInquiry,
    /// Anything the booking form did not offer, kept as typed.
    Other(String),
}

impl Service {
    /// Shown to the caller when no service was picked.
    pub const FALLBACK_LABEL: &'static str = "General Inquiry";

    pub fn parse(s: &str) -> Service {
        match s.trim() {
            "ai-business-optimization" => Self::BusinessOptimization,
            "ai-assistants" => Self::Assistants,
            "web-dev" => Self::WebDevelopment,
            "content-gen" => Self::ContentGeneration,
            "custom-agents" => Self::CustomAgents,
            "consulting" => Self::Consulting,
            "general-inquiry" | "" => Self::GeneralInquiry,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::BusinessOptimization => "AI Business Optimization",
            Self::Assistants => "Enterprise AI Assistants",
            Self::WebDevelopment => "AI-Powered Web & App Development",
            Self::ContentGeneration => "AI & Content Generation",
            Self::CustomAgents => "Custom AI Agent Development",
            Self::Consulting => "AI Consulting & Training",
            Self::GeneralInquiry => Self::FALLBACK_LABEL,
            Self::Other(s) => s,
        }
    }
}

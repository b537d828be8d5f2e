use std::fmt;
use serde::{ Deserialize, Deserializer, Serialize, Serializer };

/// Severity of an invariant or sub-check; reporting weight only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Categories of property tests
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyCategory {
    GovernanceInvariants,
    BusinessRules,
    SecurityConstraints,
    DataIntegrity,
    PerformanceBounds,
    ComplianceRules,
    Custom(String), // Deployment-specific categories
}

impl PropertyCategory {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().replace('-', "_").as_str() {
            "governance" | "governance_invariants" => PropertyCategory::GovernanceInvariants,
            "business" | "business_rules" => PropertyCategory::BusinessRules,
            "security" | "security_constraints" => PropertyCategory::SecurityConstraints,
            "data" | "data_integrity" => PropertyCategory::DataIntegrity,
            "performance" | "performance_bounds" => PropertyCategory::PerformanceBounds,
            "compliance" | "compliance_rules" => PropertyCategory::ComplianceRules,
            _ => PropertyCategory::Custom(value.to_string()),
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyCategory::GovernanceInvariants => write!(f, "governance_invariants"),
            PropertyCategory::BusinessRules => write!(f, "business_rules"),
            PropertyCategory::SecurityConstraints => write!(f, "security_constraints"),
            PropertyCategory::DataIntegrity => write!(f, "data_integrity"),
            PropertyCategory::PerformanceBounds => write!(f, "performance_bounds"),
            PropertyCategory::ComplianceRules => write!(f, "compliance_rules"),
            PropertyCategory::Custom(name) => write!(f, "{}", name),
        }
    }
}

// Serialized as its snake_case name so categories work as JSON map keys
impl Serialize for PropertyCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(PropertyCategory::parse(&name))
    }
}

/// Candidate-generation policy a generator should use when shrinking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkMode {
    Minimal, // Jump straight to the simplest value
    Linear,  // Step one unit at a time
    Binary,  // Halve the distance to the simplest value
}

/// Advisory constraints declared by a generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConstraints {
    pub range: Option<(f64, f64)>,
    pub length: Option<(usize, usize)>,
    pub pattern: Option<String>,
    /// Free-form description of a custom predicate
    pub custom: Option<String>,
}

impl GeneratorConstraints {
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some((min, max)) = self.range {
            parts.push(format!("range [{}, {})", min, max));
        }
        if let Some((min, max)) = self.length {
            parts.push(format!("length {}..={}", min, max));
        }
        if let Some(pattern) = &self.pattern {
            parts.push(format!("pattern {}", pattern));
        }
        if let Some(custom) = &self.custom {
            parts.push(custom.clone());
        }
        if parts.is_empty() {
            "unconstrained".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Identity of a registered generator, for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub id: String,
    pub name: String,
    pub type_tag: String,
    pub constraints: Option<GeneratorConstraints>,
}

/// Identity of a registered test, for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PropertyCategory,
    pub generators: Vec<String>,
    pub severity: Severity,
}

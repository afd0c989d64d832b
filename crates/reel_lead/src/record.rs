//! The lead record and its choice lists
//!
//! A [`LeadRecord`] is the flat field-value payload a delivery endpoint
//! receives. Field names serialize in camelCase (`firstName`,
//! `projectType`, `additionalNotes`) and choice values serialize as the
//! option values the form offers (`"webapp"`, `"increase-sales"`,
//! `"10k-25k"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LeadError, Result};

/// Defines a closed list of form options with a wire value and a label
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($variant:ident = $value:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every option, in the order the form lists them
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Value sent on the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Human readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LeadError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| LeadError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = LeadError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(option: $name) -> Self {
                option.as_str().to_string()
            }
        }
    };
}

choice! {
    /// Kind of work being enquired about (multi-select)
    ProjectType as "project type" {
        Website = "website", "Website Development";
        WebApp = "webapp", "Web Application";
        Mobile = "mobile", "Mobile App";
        Ecommerce = "ecommerce", "E-commerce";
        Branding = "branding", "Branding & Design";
        Consulting = "consulting", "Consulting";
    }
}

choice! {
    /// Business goal of the project (multi-select)
    Goal as "goal" {
        IncreaseSales = "increase-sales", "Increase Sales";
        BrandAwareness = "brand-awareness", "Brand Awareness";
        UserEngagement = "user-engagement", "User Engagement";
        Automation = "automation", "Process Automation";
        Modernization = "modernization", "Modernization";
        MarketExpansion = "market-expansion", "Market Expansion";
    }
}

choice! {
    /// Budget range
    Budget as "budget" {
        Under5k = "<5k", "Less than $5,000";
        From5kTo10k = "5k-10k", "$5,000 - $10,000";
        From10kTo25k = "10k-25k", "$10,000 - $25,000";
        From25kTo50k = "25k-50k", "$25,000 - $50,000";
        From50kTo100k = "50k-100k", "$50,000 - $100,000";
        Over100k = "100k+", "$100,000+";
    }
}

choice! {
    /// When the work should be delivered
    ProjectTimeline as "timeline" {
        Asap = "asap", "ASAP (< 1 month)";
        OneToThreeMonths = "1-3months", "1-3 months";
        ThreeToSixMonths = "3-6months", "3-6 months";
        OverSixMonths = "6months+", "6+ months";
        Flexible = "flexible", "Flexible";
    }
}

choice! {
    Urgency as "urgency" {
        Low = "Low", "Low";
        Medium = "Medium", "Medium";
        High = "High", "High";
    }
}

choice! {
    /// How the visitor found the studio
    ReferralSource as "referral source" {
        Search = "search", "Search Engine";
        Social = "social", "Social Media";
        Referral = "referral", "Referral";
        Advertising = "advertising", "Advertising";
        Other = "other", "Other";
    }
}

/// Everything the enquiry form collects
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadRecord {
    // Contact
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub role: String,

    // Project
    pub project_type: Vec<ProjectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<ProjectTimeline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,

    // Requirements
    pub description: String,
    pub goals: Vec<Goal>,
    pub target_audience: String,
    pub competitors: String,

    // Additional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<ReferralSource>,
    pub additional_notes: String,
    pub newsletter: bool,
}

impl LeadRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the fields a lead cannot be delivered without
    ///
    /// Reports the first problem found, in form order.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(LeadError::MissingField(name));
            }
        }
        if !is_valid_email(&self.email) {
            return Err(LeadError::InvalidEmail(self.email.trim().to_string()));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// The JSON payload handed to delivery
    pub fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// `local@domain.tld`: a non-empty local part, no whitespace, and a dot
/// inside the domain
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(dot) => dot > 0 && !domain.ends_with('.'),
        None => false,
    }
}

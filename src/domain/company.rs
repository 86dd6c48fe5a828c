//! Company domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Company status. `Active -> Deleted` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    #[default]
    Active,
    Deleted,
}

impl std::str::FromStr for CompanyStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CompanyStatus::Active),
            "deleted" => Ok(CompanyStatus::Deleted),
            _ => Err(format!("Unknown company status: {}", s)),
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanyStatus::Active => write!(f, "active"),
            CompanyStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for CompanyStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl sqlx::Type<sqlx::MySql> for CompanyStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for CompanyStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        let s = match self {
            CompanyStatus::Active => "active",
            CompanyStatus::Deleted => "deleted",
        };
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&s, buf)
    }
}

/// Company entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub country: String,
    pub website: String,
    pub phone: String,
    pub status: CompanyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Company {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: String::new(),
            code: String::new(),
            country: String::new(),
            website: String::new(),
            phone: String::new(),
            status: CompanyStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a new company.
///
/// Missing fields deserialize as empty strings so that they are reported by
/// validation rather than as an undecodable body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateCompanyInput {
    #[validate(length(min = 1, message = "no name provided"))]
    pub name: String,
    #[validate(length(min = 1, message = "no code provided"))]
    pub code: String,
    #[validate(length(min = 1, message = "no country provided"))]
    pub country: String,
    #[validate(length(min = 1, message = "no website provided"))]
    pub website: String,
    #[validate(length(min = 1, message = "no phone provided"))]
    pub phone: String,
}

impl CreateCompanyInput {
    const FIELD_ORDER: [&'static str; 5] = ["name", "code", "country", "website", "phone"];

    /// Validate and report the first missing field, in declaration order
    pub fn check(&self) -> std::result::Result<(), String> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let fields = errors.field_errors();
        Self::FIELD_ORDER
            .iter()
            .filter_map(|name| fields.get(*name))
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .map_or_else(|| Err(errors.to_string()), Err)
    }
}

/// Partial update. Absent and empty attributes leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyPatch {
    pub id: i64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
}

impl CompanyPatch {
    /// Apply present attributes to `company`
    pub fn apply_to(&self, company: &mut Company) {
        if let Some(name) = &self.name {
            company.name = name.clone();
        }
        if let Some(code) = &self.code {
            company.code = code.clone();
        }
        if let Some(country) = &self.country {
            company.country = country.clone();
        }
        if let Some(website) = &self.website {
            company.website = website.clone();
        }
        if let Some(phone) = &self.phone {
            company.phone = phone.clone();
        }
    }
}

/// Sparse list predicate. Present attributes narrow the result by exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CompanyFilter {
    #[serde(default, deserialize_with = "zero_as_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "limit must be positive"))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: Option<i64>,
}

impl CompanyFilter {
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Whether `company` satisfies every present predicate
    pub fn matches(&self, company: &Company) -> bool {
        fn eq(pred: &Option<String>, value: &str) -> bool {
            pred.as_deref().is_none_or(|p| p == value)
        }

        company.status == CompanyStatus::Active
            && self.id.is_none_or(|id| id == company.id)
            && eq(&self.name, &company.name)
            && eq(&self.code, &company.code)
            && eq(&self.country, &company.country)
            && eq(&self.website, &company.website)
            && eq(&self.phone, &company.phone)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.filter(|id| *id != 0))
}

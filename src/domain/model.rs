use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// 後端對未填的文字欄位有時給 null，有時乾脆省略
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 目錄裡的一所學校，抓回來之後就不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logo_link: String,
    #[serde(default)]
    pub year_of_establishment: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recognition: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medium: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub intake: String,
}

impl College {
    /// "country, state"，比較表與卡片共用
    pub fn location(&self) -> String {
        format!("{}, {}", self.country, self.state)
    }

    pub fn detail_path(&self) -> String {
        format!("/colleges/{}", self.id)
    }
}

/// 學校詳情頁的分頁
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Intro,
    CourseFees,
    AdmissionEligibility,
    Benefits,
    CampusInfo,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        DetailTab::Intro,
        DetailTab::CourseFees,
        DetailTab::AdmissionEligibility,
        DetailTab::Benefits,
        DetailTab::CampusInfo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DetailTab::Intro => "intro",
            DetailTab::CourseFees => "course_fees",
            DetailTab::AdmissionEligibility => "admission_eligibility",
            DetailTab::Benefits => "benefits",
            DetailTab::CampusInfo => "campus_info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Intro => "Introduction",
            DetailTab::CourseFees => "Courses & Fees",
            DetailTab::AdmissionEligibility => "Admission & Eligibility",
            DetailTab::Benefits => "Benefits",
            DetailTab::CampusInfo => "Campus Info",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeDetail {
    #[serde(flatten)]
    pub college: College,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub intro: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course_fees: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub admission_eligibility: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub benefits: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub campus_info: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl CollegeDetail {
    pub const EMPTY_TAB: &'static str = "No data available.";

    /// 原始 markdown 文字；空白分頁顯示固定提示
    pub fn tab_content(&self, tab: DetailTab) -> &str {
        let raw: &str = match tab {
            DetailTab::Intro => &self.intro,
            DetailTab::CourseFees => &self.course_fees,
            DetailTab::AdmissionEligibility => &self.admission_eligibility,
            DetailTab::Benefits => &self.benefits,
            DetailTab::CampusInfo => &self.campus_info,
        };
        if raw.trim().is_empty() {
            Self::EMPTY_TAB
        } else {
            raw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flag_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flag_image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

impl Country {
    /// 後端存的是跳脫過的 "\n" 字面值
    pub fn normalized_body(&self) -> String {
        self.body.replace("\\n", "\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl BlogSummary {
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_timestamp_date(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(flatten)]
    pub summary: BlogSummary,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
}

fn parse_timestamp_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

/// 後台看到的潛在客戶（來自 interest 表單）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email_address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub college_of_interest: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl Customer {
    pub fn fields(&self) -> [&str; 8] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.phone_number.as_str(),
            self.email_address.as_str(),
            self.country.as_str(),
            self.state.as_str(),
            self.college_of_interest.as_str(),
            self.created_at.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestForm {
    pub name: String,
    pub phone_number: String,
    pub email_address: String,
    pub country: String,
    pub state: String,
    pub college_of_interest: String,
}

impl Validate for InterestForm {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_field("Full name", &self.name)?;
        validation::validate_phone("Mobile number", &self.phone_number)?;
        if !self.email_address.trim().is_empty() {
            validation::validate_email("Email address", &self.email_address)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegePayload {
    pub name: String,
    pub country: String,
    pub state: String,
    pub year_of_establishment: i32,
    pub intro: String,
    pub course_fees: String,
    pub admission_eligibility: String,
    pub benefits: String,
    pub campus_info: String,
    pub logo_link: String,
    pub intake: String,
    pub duration: String,
    pub recognition: String,
    pub medium: String,
}

impl From<CollegeDetail> for CollegePayload {
    fn from(detail: CollegeDetail) -> Self {
        let CollegeDetail {
            college,
            intro,
            course_fees,
            admission_eligibility,
            benefits,
            campus_info,
            ..
        } = detail;
        Self {
            name: college.name,
            country: college.country,
            state: college.state,
            year_of_establishment: college.year_of_establishment,
            intro,
            course_fees,
            admission_eligibility,
            benefits,
            campus_info,
            logo_link: college.logo_link,
            intake: college.intake,
            duration: college.duration,
            recognition: college.recognition,
            medium: college.medium,
        }
    }
}

impl Validate for CollegePayload {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_field("College name", &self.name)?;
        validation::validate_non_empty_field("Country", &self.country)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPayload {
    pub name: String,
    pub flag_image: String,
    pub body: String,
}

impl Validate for CountryPayload {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_field("Country name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub content: String,
}

impl Validate for BlogPayload {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_field("Title", &self.title)?;
        validation::validate_non_empty_field("Content", &self.content)?;
        Ok(())
    }
}

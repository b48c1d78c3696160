use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static COURSE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^course-v1:(?P<org>[\w\-~.:]+)\+(?P<course>[\w\-~.:]+)\+(?P<run>[\w\-~.:]+)$")
        .expect("Invalid course key regex")
});

static LEGACY_COURSE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<org>[\w\-~.:]+)/(?P<course>[\w\-~.:]+)/(?P<run>[\w\-~.:]+)$")
        .expect("Invalid legacy course key regex")
});

static USAGE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^block-v1:(?P<org>[\w\-~.:]+)\+(?P<course>[\w\-~.:]+)\+(?P<run>[\w\-~.:]+)\+type@[\w\-]+\+block@[\w\-~.:]+$",
    )
    .expect("Invalid usage key regex")
});

// 课程标识
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    pub org: String,
    pub course: String,
    pub run: String,
}

impl CourseKey {
    /// 从内容位置（usage key）解析所属课程
    pub fn from_usage_key(usage_key: &str) -> Result<Self, String> {
        let caps = USAGE_KEY_RE
            .captures(usage_key)
            .ok_or_else(|| format!("Invalid usage key: {usage_key}"))?;
        Ok(Self {
            org: caps["org"].to_string(),
            course: caps["course"].to_string(),
            run: caps["run"].to_string(),
        })
    }
}

impl std::str::FromStr for CourseKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = COURSE_KEY_RE
            .captures(s)
            .or_else(|| LEGACY_COURSE_KEY_RE.captures(s))
            .ok_or_else(|| format!("Invalid course key: {s}"))?;
        Ok(Self {
            org: caps["org"].to_string(),
            course: caps["course"].to_string(),
            run: caps["run"].to_string(),
        })
    }
}

impl std::fmt::Display for CourseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "course-v1:{}+{}+{}", self.org, self.course, self.run)
    }
}

// 课程角色
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CourseRole {
    Staff,      // 课程助教
    Instructor, // 授课教师
}

impl CourseRole {
    pub const STAFF: &'static str = "staff";
    pub const INSTRUCTOR: &'static str = "instructor";

    pub fn staff_roles() -> &'static [&'static CourseRole] {
        &[&Self::Staff, &Self::Instructor]
    }
}

impl<'de> Deserialize<'de> for CourseRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CourseRole>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for CourseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseRole::Staff => write!(f, "{}", CourseRole::STAFF),
            CourseRole::Instructor => write!(f, "{}", CourseRole::INSTRUCTOR),
        }
    }
}

impl std::str::FromStr for CourseRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CourseRole::STAFF => Ok(CourseRole::Staff),
            CourseRole::INSTRUCTOR => Ok(CourseRole::Instructor),
            _ => Err(format!("Invalid course role: {s}")),
        }
    }
}

// 课程概览
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOverview {
    pub id: String,
    pub display_name: String,
    pub other_course_settings: serde_json::Value,
}

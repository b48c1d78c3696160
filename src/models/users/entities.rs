use serde::{Deserialize, Serialize};

use crate::utils::names::split_full_name;

// 宿主平台用户
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_staff: bool,
    pub is_active: bool,
}

impl User {
    /// 按第一个空格拆分姓名，返回 (given_name, family_name)
    pub fn name_parts(&self) -> (String, String) {
        split_full_name(&self.full_name)
    }
}

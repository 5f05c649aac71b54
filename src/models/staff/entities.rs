use serde::{Deserialize, Serialize};

crate::string_enum! {
    // 职位
    pub enum StaffPosition {
        Teacher => "teacher",
        Admin => "admin",
        Support => "support",
    }
}

crate::string_enum! {
    // 在职状态
    pub enum StaffStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

// 教职工实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub staff_no: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: StaffPosition,
    pub status: StaffStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

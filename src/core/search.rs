use crate::domain::model::{College, Customer};

/// 名稱或國家包含關鍵字（不分大小寫）
pub fn matches(college: &College, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    matches_lowercase(college, &needle)
}

fn matches_lowercase(college: &College, needle: &str) -> bool {
    college.name.to_lowercase().contains(needle) || college.country.to_lowercase().contains(needle)
}

/// 惰性版本，保留目錄原本的順序
pub fn filter_iter<'a>(
    colleges: &'a [College],
    query: &str,
) -> impl Iterator<Item = &'a College> + 'a {
    let needle = query.to_lowercase();
    colleges
        .iter()
        .filter(move |college| matches_lowercase(college, &needle))
}

/// 空字串回傳完整目錄
pub fn filter(colleges: &[College], query: &str) -> Vec<College> {
    filter_iter(colleges, query).cloned().collect()
}

/// 後台客戶清單：任何一個欄位命中即可
pub fn filter_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
    let needle = query.to_lowercase();
    customers
        .iter()
        .filter(|customer| {
            customer
                .fields()
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

//! Static query roster: the Taebaek-area schools, in display order.
//!
//! Elementary first, then middle, high, and the special school. The output
//! of a query cycle keeps exactly this order.

use crate::domain::SchoolEntry;

const TAEBAEK_SCHOOLS: [&str; 23] = [
    "동점초등학교",
    "미동초등학교",
    "삼성초등학교",
    "상장초등학교",
    "장성초등학교",
    "철암초등학교",
    "태백초등학교",
    "태서초등학교",
    "통리초등학교",
    "함태초등학교",
    "황지중앙초등학교",
    "황지초등학교",
    "상장중학교",
    "세연중학교",
    "태백중학교",
    "함태중학교",
    "황지중학교",
    "장성여자고등학교",
    "철암고등학교",
    "한국항공고등학교",
    "황지고등학교",
    "황지정보산업고등학교",
    "태백라온학교",
];

/// Builds the roster with levels derived from each name.
pub fn taebaek_roster() -> Vec<SchoolEntry> {
    TAEBAEK_SCHOOLS.iter().map(|n| SchoolEntry::new(*n)).collect()
}

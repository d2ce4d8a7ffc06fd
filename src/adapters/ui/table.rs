//! Terminal rendering: results grouped by school level, plus summary stats.
//!
//! Allergen codes are parsed out of each dish at display time; the raw
//! provider text is never modified.

use crate::domain::{DishEntry, MealSlot, MenuOutcome, MenuResult, SchoolLevel};
use crate::usecases::QueryStats;
use chrono::NaiveDate;
use crossterm::style::Stylize;

/// Shortened display name, as the source region's readers expect:
/// `황지초등학교` renders as `황지초`, `황지고등학교` as `황지고`.
fn short_name(name: &str) -> String {
    name.replace("학교", "").replace('등', "")
}

/// One dish line: name plus a parenthesized allergen annotation when codes
/// are present.
fn format_dish(dish: &DishEntry) -> String {
    let codes = dish.allergen_codes();
    if codes.is_empty() {
        dish.name().to_string()
    } else {
        let list = codes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{} (알레르기 {})", dish.name(), list)
    }
}

fn sentinel_notice(outcome: &MenuOutcome) -> &'static str {
    match outcome {
        MenuOutcome::Menu(_) => "",
        MenuOutcome::NoData => "급식 정보가 없습니다",
        MenuOutcome::FetchFailed => "정보를 불러오지 못했습니다",
        MenuOutcome::SchoolNotFound => "학교 코드를 찾을 수 없습니다",
        MenuOutcome::WorkerFailed => "조회 작업이 실패했습니다",
    }
}

/// Prints the grouped comparison view followed by summary statistics.
pub fn render(results: &[MenuResult], date: NaiveDate, slot: MealSlot) {
    println!();
    println!(
        "{}",
        format!("{} {} 메뉴", date.format("%Y년 %m월 %d일"), slot.label())
            .bold()
            .underlined()
    );

    for level in SchoolLevel::DISPLAY_ORDER {
        let group: Vec<&MenuResult> = results.iter().filter(|r| r.level == level).collect();
        if group.is_empty() {
            continue;
        }
        println!();
        println!("{}", format!("[{}]", level.label()).cyan().bold());
        for result in group {
            let name = short_name(&result.school_name);
            match &result.outcome {
                MenuOutcome::Menu(dishes) => {
                    println!("  {}", name.green().bold());
                    for dish in dishes {
                        println!("    - {}", format_dish(dish));
                    }
                }
                other => {
                    println!("  {}  {}", name.bold(), sentinel_notice(other).red());
                }
            }
        }
    }

    let stats = QueryStats::from_results(results);
    println!();
    println!(
        "전체 {}개교 중 {}개교 조회 성공 ({:.1}%)",
        stats.schools_queried,
        stats.schools_with_menu,
        stats.success_rate()
    );
}

//! Inclusion rules deciding which postings are genuinely entry level.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::models::JobRecord;

/// Role-seniority words. Any hit rejects the posting outright, before the
/// experience rule is consulted. English words match whole words only.
const SENIOR_KEYWORDS_EN: &[&str] = &[
    "team-lead",
    "teamlead",
    "lead",
    "senior",
    "manager",
    "director",
    "expert",
    "career hire",
];

/// Only a role word when it does not end a longer Hangul word ("하이브리드").
const LEAD_KO: &str = "리드";

const SENIOR_KEYWORDS_KO: &[&str] = &[
    "시니어",
    "매니저",
    "디렉터",
    "팀장",
    "파트장",
    "전문가",
    "경력직",
    "경력 채용",
    "경력채용",
];

const ENTRY_KEYWORDS: &[&str] = &["신입", "인턴"];

/// Non-game industries. Only consulted by [`IndustryFilter`].
const NON_GAME_KEYWORDS: &[&str] = &[
    "의료", "바이오", "금융", "은행", "증권", "보험", "회계", "세무", "반도체", "자율주행",
    "하드웨어", "제조", "건설", "공사", "공단", "병원", "약사", "쇼핑몰", "커머스", "물류",
    "택배", "남동발전", "카지노", "저축은행", "광고대행", "기업브랜딩", "마케팅전문",
];

/// Why a posting was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    SeniorRole(&'static str),
    /// Years of experience asked for, without an overriding entry marker.
    ExperienceRequired(u32),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Allow-list filter over the lowercased company and position text. Only
/// explicit seniority signals reject; anything ambiguous is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityClassifier;

impl EligibilityClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn is_eligible(&self, job: &JobRecord) -> bool {
        self.classify(job).is_eligible()
    }

    pub fn classify(&self, job: &JobRecord) -> Eligibility {
        Self::classify_text(&job.search_text())
    }

    /// `text` must already be lowercased.
    pub fn classify_text(text: &str) -> Eligibility {
        if let Some(keyword) = senior_keyword(text) {
            return Eligibility::SeniorRole(keyword);
        }

        match required_years(text) {
            Some(years) if years >= 4 => Eligibility::ExperienceRequired(years),
            Some(years) if years >= 2 && !has_entry_marker(text) => {
                Eligibility::ExperienceRequired(years)
            }
            _ => Eligibility::Eligible,
        }
    }
}

fn senior_keyword(text: &str) -> Option<&'static str> {
    static ENGLISH: OnceLock<Regex> = OnceLock::new();
    static LEAD: OnceLock<Regex> = OnceLock::new();
    let english = ENGLISH.get_or_init(|| {
        let words: Vec<String> = SENIOR_KEYWORDS_EN.iter().map(|w| regex::escape(w)).collect();
        Regex::new(&format!(r"\b(?:{})\b", words.join("|"))).unwrap()
    });
    let lead = LEAD.get_or_init(|| Regex::new(r"(?:^|\P{Hangul})리드").unwrap());

    if let Some(m) = english.find(text) {
        return SENIOR_KEYWORDS_EN.iter().copied().find(|w| *w == m.as_str());
    }
    if lead.is_match(text) {
        return Some(LEAD_KO);
    }
    SENIOR_KEYWORDS_KO.iter().copied().find(|k| text.contains(k))
}

/// Figures above this are not read as years of experience.
const MAX_EXPERIENCE_YEARS: u32 = 20;

/// Largest explicit "N년" / "N years" figure in `text`.
///
/// Calendar years are skipped: four-digit years ("2026년"), short forms with
/// an apostrophe or a half/year marker ("26년 상반기", "'25년도"), and any
/// figure above [`MAX_EXPERIENCE_YEARS`].
fn required_years(text: &str) -> Option<u32> {
    static YEARS: OnceLock<Regex> = OnceLock::new();
    let years = YEARS.get_or_init(|| {
        Regex::new(
            r"(?:^|[^0-9'’])([0-9]{1,2})\s*\+?\s*(?:년(\s*(?:상반기|하반기|도))?|years?|yrs?)",
        )
        .unwrap()
    });

    years
        .captures_iter(text)
        .filter(|caps| caps.get(2).is_none())
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .filter(|n| *n <= MAX_EXPERIENCE_YEARS)
        .max()
}

fn has_entry_marker(text: &str) -> bool {
    static ENGLISH: OnceLock<Regex> = OnceLock::new();
    let english = ENGLISH.get_or_init(|| {
        Regex::new(r"\b(?:interns?|internships?|new[ -]?grads?|entry[ -]level)\b").unwrap()
    });

    ENTRY_KEYWORDS.iter().any(|k| text.contains(k)) || english.is_match(text)
}

/// Opt-in filter dropping postings from clearly non-game industries.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndustryFilter;

impl IndustryFilter {
    pub fn is_game_industry(&self, job: &JobRecord) -> bool {
        let text = job.search_text();
        !NON_GAME_KEYWORDS.iter().any(|k| text.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Category, Deadline};

    fn job(company: &str, position: &str) -> JobRecord {
        JobRecord::create(
            company,
            position,
            "https://example.com/1",
            Deadline::Unknown,
            "신입",
            Category::Other,
            &[],
        )
        .unwrap()
    }

    fn eligible(company: &str, position: &str) -> bool {
        EligibilityClassifier::new().is_eligible(&job(company, position))
    }

    #[test]
    fn test_senior_keywords_reject_in_any_case() {
        assert!(!eligible("Nexon", "Senior Client Programmer"));
        assert!(!eligible("Nexon", "TECH LEAD, 신입 환영"));
        assert!(!eligible("Krafton", "QA Manager 인턴"));
        assert!(!eligible("넷마블", "시니어 서버 개발자"));
        assert!(!eligible("펄어비스", "아트 디렉터"));
    }

    #[test]
    fn test_senior_keyword_wins_over_entry_marker() {
        assert_eq!(
            EligibilityClassifier::classify_text("시니어 신입 프로그램"),
            Eligibility::SeniorRole("시니어")
        );
    }

    #[test]
    fn test_four_or_more_years_rejects_unconditionally() {
        assert!(!eligible("컴투스", "서버 개발 4년 이상"));
        assert!(!eligible("컴투스", "신입/경력 5년차 이상"));
        assert!(!eligible("컴투스", "인턴 (경력 10년)"));
        assert_eq!(
            EligibilityClassifier::classify_text("unity developer 4+ years"),
            Eligibility::ExperienceRequired(4)
        );
    }

    #[test]
    fn test_two_or_three_years_needs_entry_marker() {
        assert!(eligible("웹젠", "신입 또는 2년 이하 클라이언트"));
        assert!(eligible("웹젠", "3년 미만 인턴 모집"));
        assert!(!eligible("웹젠", "2년 이상 클라이언트"));
        assert!(!eligible("웹젠", "경험 3년 서버"));
        assert!(eligible("Smilegate", "Game Designer intern, 2 years of school projects"));
        assert!(!eligible("Smilegate", "International game designer, 2 years"));
    }

    #[test]
    fn test_small_or_absent_experience_is_accepted() {
        assert!(eligible("데브시스터즈", "클라이언트 개발 (1년 이상)"));
        assert!(eligible("데브시스터즈", "0년 신입"));
        assert!(eligible("데브시스터즈", "게임 기획"));
    }

    #[test]
    fn test_calendar_years_are_not_experience() {
        assert!(eligible("(주)넥슨코리아", "2026년 하반기 공개채용"));
    }

    #[test]
    fn test_short_calendar_years_are_not_experience() {
        assert_eq!(
            EligibilityClassifier::classify_text("넥슨코리아 26년 상반기 신입 공개채용"),
            Eligibility::Eligible
        );
        assert!(eligible("(주)넷마블", "25년 하반기 신입사원 채용"));
        assert!(eligible("스마일게이트", "'26년도 인턴십 모집"));
        assert!(eligible("크래프톤", "신입 공채 (24년 졸업자 포함)"));
    }

    #[test]
    fn test_calendar_marker_does_not_hide_real_experience() {
        assert_eq!(
            EligibilityClassifier::classify_text("26년 상반기 서버 개발 (경력 5년 이상)"),
            Eligibility::ExperienceRequired(5)
        );
    }

    #[test]
    fn test_senior_words_must_stand_alone() {
        assert_eq!(
            EligibilityClassifier::classify_text("웹젠 하이브리드 앱 개발 신입"),
            Eligibility::Eligible
        );
        assert!(eligible("Com2uS", "Junior programmer at a leading studio"));
        assert!(eligible("Com2uS", "Misleadingly simple puzzle QA 인턴"));
        assert_eq!(
            EligibilityClassifier::classify_text("게임 리드 프로그래머"),
            Eligibility::SeniorRole("리드")
        );
        assert_eq!(
            EligibilityClassifier::classify_text("client team-lead"),
            Eligibility::SeniorRole("team-lead")
        );
    }

    #[test]
    fn test_uses_max_figure() {
        assert_eq!(
            EligibilityClassifier::classify_text("1년~5년 경력"),
            Eligibility::ExperienceRequired(5)
        );
    }

    #[test]
    fn test_industry_filter() {
        let filter = IndustryFilter;
        assert!(!filter.is_game_industry(&job("OO저축은행", "IT 개발 신입")));
        assert!(filter.is_game_industry(&job("시프트업", "클라이언트 프로그래머")));
    }
}

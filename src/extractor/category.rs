use crate::domain::models::Category;

/// Keyword sets in priority order. The first set with a hit wins, so a title
/// such as "게임 기획 (서버 이해)" resolves to `Design`, not `Programming`.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Design,
        &[
            "기획", "design", "designer", "planner", "planning", "레벨디자인", "밸런스",
        ],
    ),
    (
        Category::Programming,
        &[
            "programming", "programmer", "프로그래밍", "프로그래머", "개발", "developer",
            "engineer", "엔지니어", "server", "서버", "client", "클라이언트", "engine",
            "엔진", "unity", "유니티", "unreal", "언리얼", "c++", "backend", "frontend",
        ],
    ),
    (
        Category::Art,
        &[
            "art", "artist", "아트", "원화", "그래픽", "graphic", "모델러", "modeler",
            "애니메이터", "animator", "이펙트", "이펙터", "effect", "ui디자이너", "3d", "2d",
        ],
    ),
    (
        Category::Marketing,
        &[
            "marketing", "마케팅", "마케터", "marketer", "홍보", "pr", "운영", "사업", "cs",
            "community", "커뮤니티",
        ],
    ),
];

/// Infers a category from posting text, falling back to `Other`.
pub fn infer_category(position: &str) -> Category {
    infer_category_or(position, Category::Other)
}

/// Like [`infer_category`] but with a caller-chosen fallback for sources whose
/// search query already implies a category.
pub fn infer_category_or(position: &str, fallback: Category) -> Category {
    let text = position.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(fallback)
}

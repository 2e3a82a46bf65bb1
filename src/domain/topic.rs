//! 话题目录
//!
//! 静态话题表，核心管线只把它当作纯查找使用。
//! icon/color/category 仅供前端选择界面展示。

use serde::Serialize;

/// 可订阅的话题
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: &'static str,
}

/// 内置话题目录
pub const TOPICS: &[Topic] = &[
    Topic {
        id: "technology",
        name: "Technology",
        icon: "🚀",
        color: "#3B82F6",
        category: "Tech & Science",
    },
    Topic {
        id: "ai",
        name: "AI & Machine Learning",
        icon: "🤖",
        color: "#8B5CF6",
        category: "Tech & Science",
    },
    Topic {
        id: "science",
        name: "Science",
        icon: "🔬",
        color: "#06B6D4",
        category: "Tech & Science",
    },
    Topic {
        id: "business",
        name: "Business & Finance",
        icon: "📈",
        color: "#10B981",
        category: "Business",
    },
    Topic {
        id: "startups",
        name: "Startups",
        icon: "💡",
        color: "#F59E0B",
        category: "Business",
    },
    Topic {
        id: "crypto",
        name: "Crypto & Web3",
        icon: "💰",
        color: "#EAB308",
        category: "Business",
    },
    Topic {
        id: "health",
        name: "Health & Wellness",
        icon: "💪",
        color: "#EC4899",
        category: "Lifestyle",
    },
    Topic {
        id: "sports",
        name: "Sports",
        icon: "⚽",
        color: "#EF4444",
        category: "Entertainment",
    },
    Topic {
        id: "entertainment",
        name: "Entertainment",
        icon: "🎬",
        color: "#F97316",
        category: "Entertainment",
    },
    Topic {
        id: "gaming",
        name: "Gaming",
        icon: "🎮",
        color: "#A855F7",
        category: "Entertainment",
    },
    Topic {
        id: "world",
        name: "World News",
        icon: "🌍",
        color: "#14B8A6",
        category: "News",
    },
    Topic {
        id: "politics",
        name: "Politics",
        icon: "🏛️",
        color: "#6366F1",
        category: "News",
    },
];

/// 按 ID 查找单个话题
pub fn topic_by_id(id: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|t| t.id == id)
}

/// 批量解析话题 ID（按目录顺序返回，未知 ID 被忽略）
pub fn resolve_topics(ids: &[String]) -> Vec<&'static Topic> {
    TOPICS
        .iter()
        .filter(|t| ids.iter().any(|id| id == t.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_by_id() {
        assert_eq!(topic_by_id("ai").unwrap().name, "AI & Machine Learning");
        assert!(topic_by_id("unknown").is_none());
    }

    #[test]
    fn test_resolve_keeps_catalog_order() {
        // 请求顺序与目录顺序相反，结果仍按目录顺序
        let ids = vec!["ai".to_string(), "technology".to_string()];
        let topics = resolve_topics(&ids);
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].id, "technology");
        assert_eq!(topics[1].id, "ai");
    }

    #[test]
    fn test_resolve_ignores_unknown_ids() {
        let ids = vec!["gaming".to_string(), "nope".to_string()];
        let topics = resolve_topics(&ids);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, "gaming");
    }
}

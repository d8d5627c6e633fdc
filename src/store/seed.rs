use serde_json::{json, Value};
use tracing::info;

use super::{SectionStore, StoreError};

/// Seed the default portfolio document when the store has no rows at all.
/// Returns true if seeding happened.
pub async fn seed_if_empty(store: &SectionStore) -> Result<bool, StoreError> {
    if !store.is_empty().await? {
        return Ok(false);
    }

    for (section, content) in default_sections() {
        store.put(section, &content).await?;
    }
    info!("store was empty, seeded default portfolio document");
    Ok(true)
}

/// The default portfolio content, one entry per section.
pub fn default_sections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "about",
            json!({
                "title": "Shefali",
                "role": "Full Stack Developer",
                "tagline": "Building digital experiences that matter.",
                "intro": "I am a results-driven developer focused on building scalable, user-centric web applications.",
                "highlights": [
                    "Expertise in modern JavaScript frameworks (React, Node.js).",
                    "Proven ability to design efficient, scalable database schemas.",
                    "Passionate about clean code and performance optimization."
                ],
                "closing": "Currently seeking opportunities to leverage my full-stack skills.",
                "image": "https://via.placeholder.com/150"
            }),
        ),
        (
            "contact",
            json!({
                "email": "user@example.com",
                "socials": {
                    "github": "https://github.com/shefukri",
                    "linkedin": "https://www.linkedin.com/in/shefali-582845289/",
                    "instagram": "https://instagram.com"
                }
            }),
        ),
        (
            "stats",
            json!([
                { "label": "Years Experience", "value": 3, "suffix": "+" },
                { "label": "Projects Completed", "value": 15, "suffix": "+" },
                { "label": "Technologies", "value": 10, "suffix": "+" }
            ]),
        ),
        (
            "projects",
            json!([
                {
                    "id": 1,
                    "title": "Amazon Clone",
                    "description": "Static e-commerce interface replicating Amazon's homepage layout and product grid.",
                    "tech": ["HTML", "CSS"],
                    "link": "#"
                },
                {
                    "id": 2,
                    "title": "Spotify Clone",
                    "description": "Responsive music player interface with playlist section and playback controls.",
                    "tech": ["HTML", "CSS", "JavaScript"],
                    "link": "#"
                },
                {
                    "id": 3,
                    "title": "Todo App",
                    "description": "Persistent Todo application using Local Storage to save data across refreshes.",
                    "tech": ["HTML", "CSS", "TailwindCSS", "JavaScript"],
                    "link": "https://shefukri.github.io/Todo-App/"
                },
                {
                    "id": 4,
                    "title": "Simon Says Game",
                    "description": "Interactive memory game with sound generation using the Web Audio API.",
                    "tech": ["HTML", "CSS", "JavaScript"],
                    "link": "https://shefukri.github.io/Simon-says-/"
                }
            ]),
        ),
        (
            "education",
            json!([
                { "id": 1, "institution": "National Institute of Technology, Meghalaya", "degree": "B.Tech (Computer Science and Engineering)", "year": "2023-2027", "score": "CGPA: 9.37" },
                { "id": 2, "institution": "Arvind Mahila College", "degree": "Intermediate/XII", "year": "2022", "score": "89%" },
                { "id": 3, "institution": "B.D Public School", "degree": "Matric/X", "year": "2020", "score": "93%" }
            ]),
        ),
        (
            "experience",
            json!([
                {
                    "id": 1,
                    "company": "Tech Workshop (Cognitia)",
                    "role": "Volunteer",
                    "year": "Aug 2024",
                    "description": "Assisted in organizing workshops and seminars for budding developers.",
                    "location": "Shillong, Meghalaya"
                },
                {
                    "id": 2,
                    "company": "NASA Space Apps Challenge",
                    "role": "Global Nominee (Agrivision)",
                    "year": "2023-2024",
                    "description": "Selected as a Global Nominee for solving challenges as a galactic problem solver.",
                    "location": "Remote"
                },
                {
                    "id": 3,
                    "company": "NIT Meghalaya Hackathon",
                    "role": "Participant",
                    "year": "Nov 2023",
                    "description": "Designed a game development website along with learning content.",
                    "location": "Shillong, Meghalaya"
                }
            ]),
        ),
        (
            "skills",
            json!(["JavaScript", "React", "Node.js", "Express", "SQL", "HTML/CSS", "Git"]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_once_and_only_when_empty() {
        let store = SectionStore::in_memory().await.unwrap();

        assert!(seed_if_empty(&store).await.unwrap());
        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), default_sections().len());
        assert!(all["projects"].is_array());
        assert!(all["experience"].is_array());

        // A populated store is left alone
        assert!(!seed_if_empty(&store).await.unwrap());
    }

    #[tokio::test]
    async fn partial_store_is_not_reseeded() {
        let store = SectionStore::in_memory().await.unwrap();
        store.put("about", &json!({"title": "x"})).await.unwrap();

        assert!(!seed_if_empty(&store).await.unwrap());
        assert_eq!(store.get("projects").await.unwrap(), None);
    }
}

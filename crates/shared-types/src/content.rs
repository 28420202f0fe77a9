//! Static page content: the gallery and the advertised openings.

use serde::{Deserialize, Serialize};

use crate::{ApplicationKind, OpenPosition};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GalleryItem {
    pub id: u32,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

pub const GALLERY_CATEGORIES: [&str; 6] = ["All", "Workshop", "Hackathon", "Bootcamp", "Event", "Video"];

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=600&h=400&fit=crop")
}

pub fn gallery() -> Vec<GalleryItem> {
    let images = [
        ("AI & ML Workshop 2024", "Workshop", "Participants learning machine learning fundamentals", "photo-1485827404703-89b55fcc595e"),
        ("Innovation Hackathon", "Hackathon", "Teams brainstorming innovative solutions", "photo-1504384308090-c894fdcc538d"),
        ("Cloud Computing Bootcamp", "Bootcamp", "Hands-on AWS training session", "photo-1451187580459-43490279c0fa"),
        ("Team Collaboration", "Hackathon", "Students working on their projects", "photo-1522071820081-009f0129c71c"),
        ("Cybersecurity Session", "Workshop", "Learning about ethical hacking", "photo-1550751827-4bd374c3f58b"),
        ("Award Ceremony", "Event", "Recognizing top performers", "photo-1540575467063-178a50c2df87"),
        ("Innovex Arena Introduction", "Video", "Watch our journey and mission", "photo-1611162616475-46b635cb6868"),
        ("Web Development Sprint", "Workshop", "Building full-stack applications", "photo-1498050108023-c5249f4df085"),
        ("Networking Session", "Event", "Industry experts meeting students", "photo-1515187029135-18ee286d815b"),
    ];
    images
        .into_iter()
        .enumerate()
        .map(|(i, (title, category, description, photo))| {
            let is_video = category == "Video";
            GalleryItem {
                id: i as u32 + 1,
                media_type: if is_video { MediaType::Video } else { MediaType::Image },
                title: title.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                thumbnail: unsplash(photo),
                video_url: is_video.then(|| "https://youtube.com/@innovexarena".to_string()),
            }
        })
        .collect()
}

fn position(
    id: &str,
    title: &str,
    kind: ApplicationKind,
    description: &str,
    requirements: &[&str],
    responsibilities: &[&str],
) -> OpenPosition {
    OpenPosition {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        duration: "3-6 Months".to_string(),
        location: "Remote / Hybrid".to_string(),
        description: description.to_string(),
        requirements: requirements.iter().map(|s| s.to_string()).collect(),
        responsibilities: responsibilities.iter().map(|s| s.to_string()).collect(),
    }
}

const CS_STUDENT: &str = "Currently pursuing B.Tech/BE in Computer Science or related field";

/// Openings on the careers page or the interns page.
pub fn open_positions(kind: ApplicationKind) -> Vec<OpenPosition> {
    match kind {
        ApplicationKind::Career => vec![
            position(
                "tpm-intern",
                "Technical Project Manager Intern",
                kind,
                "Join our team as a TPM Intern and learn to manage technical projects, coordinate with development teams, and deliver results.",
                &[
                    CS_STUDENT,
                    "Strong communication and organizational skills",
                    "Basic understanding of software development lifecycle",
                    "Ability to work in a fast-paced environment",
                    "Proficiency in tools like Jira, Trello, or similar",
                ],
                &[
                    "Assist in project planning and timeline management",
                    "Coordinate between development and stakeholder teams",
                    "Track project milestones and prepare status reports",
                    "Help organize team meetings and documentation",
                    "Support in risk identification and mitigation",
                ],
            ),
            position(
                "dev-intern",
                "Software Developer Intern",
                kind,
                "Build real-world applications and gain hands-on experience with modern technologies in our development team.",
                &[
                    CS_STUDENT,
                    "Proficiency in at least one programming language (Python/JavaScript/Java)",
                    "Basic knowledge of web development (HTML, CSS, React/Angular)",
                    "Understanding of databases (SQL/NoSQL)",
                    "Problem-solving aptitude and willingness to learn",
                ],
                &[
                    "Develop and maintain web applications",
                    "Write clean, documented, and testable code",
                    "Participate in code reviews and team discussions",
                    "Collaborate with designers and product team",
                    "Debug and resolve technical issues",
                ],
            ),
        ],
        ApplicationKind::Internship => vec![
            position(
                "frontend-intern",
                "Frontend Developer Intern",
                kind,
                "Build beautiful, responsive user interfaces using React, TypeScript, and modern CSS frameworks.",
                &[
                    CS_STUDENT,
                    "Proficiency in HTML, CSS, and JavaScript",
                    "Experience with React.js or similar frameworks",
                    "Understanding of responsive design principles",
                    "Basic knowledge of Git version control",
                ],
                &[
                    "Develop and maintain frontend components",
                    "Implement responsive and accessible UI designs",
                    "Collaborate with designers and backend developers",
                    "Write clean, documented, and testable code",
                    "Participate in code reviews",
                ],
            ),
            position(
                "backend-intern",
                "Backend Developer Intern",
                kind,
                "Build scalable APIs and backend services using Node.js, Python, and cloud technologies.",
                &[
                    CS_STUDENT,
                    "Proficiency in Python, Node.js, or Java",
                    "Understanding of databases (SQL/NoSQL)",
                    "Basic knowledge of RESTful APIs",
                    "Problem-solving aptitude",
                ],
                &[
                    "Develop and maintain backend services",
                    "Design and implement database schemas",
                    "Create RESTful APIs",
                    "Optimize application performance",
                    "Write unit and integration tests",
                ],
            ),
            position(
                "uiux-intern",
                "UI/UX Design Intern",
                kind,
                "Create stunning user experiences and design systems for web and mobile applications.",
                &[
                    "Currently pursuing Design, HCI, or related field",
                    "Proficiency in Figma or Adobe XD",
                    "Understanding of UI/UX principles",
                    "Portfolio showcasing design work",
                    "Knowledge of design systems",
                ],
                &[
                    "Create wireframes and prototypes",
                    "Design user interfaces for web and mobile",
                    "Conduct user research and testing",
                    "Maintain design systems",
                    "Collaborate with development teams",
                ],
            ),
            position(
                "cloud-intern",
                "Cloud & DevOps Intern",
                kind,
                "Learn cloud infrastructure management and DevOps practices with AWS, Azure, and GCP.",
                &[
                    CS_STUDENT,
                    "Basic knowledge of Linux/Unix",
                    "Understanding of cloud concepts",
                    "Familiarity with Docker",
                    "Interest in automation and CI/CD",
                ],
                &[
                    "Manage cloud infrastructure",
                    "Implement CI/CD pipelines",
                    "Monitor and optimize cloud resources",
                    "Automate deployment processes",
                    "Document infrastructure and processes",
                ],
            ),
        ],
    }
}

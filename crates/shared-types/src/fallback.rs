//! Sample content shown on public pages until real rows are published.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{BlogPost, Event, EventType, Product, ProductCategory, Testimonial};

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, date)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

fn sample_id(namespace: u128, n: u128) -> Uuid {
    Uuid::from_u128((namespace << 64) | n)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn events() -> Vec<Event> {
    let rows = [
        (
            "AI & Machine Learning Workshop",
            "Deep dive into neural networks, TensorFlow, and practical ML applications.",
            EventType::Workshop,
            day(2025, 1, 15),
            "Virtual Event",
            Some(100),
        ),
        (
            "Cloud Computing Bootcamp",
            "Hands-on AWS certification prep with real-world projects.",
            EventType::Bootcamp,
            day(2025, 1, 22),
            "Hyderabad, India",
            Some(50),
        ),
        (
            "Innovation Hackathon 2025",
            "48-hour hackathon with prizes worth ₹5 Lakhs. Build solutions for real problems.",
            EventType::Hackathon,
            day(2025, 2, 10),
            "Multiple Colleges",
            Some(500),
        ),
        (
            "Generative AI Masterclass",
            "Learn to build applications with ChatGPT API, DALL-E, and other Gen AI tools.",
            EventType::Masterclass,
            day(2025, 2, 25),
            "Online",
            Some(200),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (title, description, event_type, date, location, seats))| Event {
            id: sample_id(1, i as u128 + 1),
            title: title.to_string(),
            description: description.to_string(),
            event_type,
            event_date: date,
            location: Some(location.to_string()),
            max_participants: seats,
            image_url: None,
            registration_deadline: None,
            is_published: true,
            created_at: date,
            updated_at: date,
        })
        .collect()
}

pub fn blog_posts() -> Vec<BlogPost> {
    let rows = [
        (
            "Getting Started with Generative AI: A Beginner's Guide",
            "getting-started-generative-ai",
            "Learn the fundamentals of generative AI, including how models like GPT and DALL-E work, and how to start building your own AI applications.",
            "AI",
            day(2024, 12, 1),
        ),
        (
            "Cloud Computing Trends for 2025",
            "cloud-computing-trends-2025",
            "Explore the latest trends in cloud computing, from serverless architectures to multi-cloud strategies that will shape the industry in 2025.",
            "Cloud",
            day(2024, 11, 25),
        ),
        (
            "How to Prepare for Your First Hackathon",
            "prepare-first-hackathon",
            "Tips and strategies to help you succeed in your first hackathon, from team formation to project ideation and presentation.",
            "Events",
            day(2024, 11, 20),
        ),
        (
            "Building Scalable Web Applications with React",
            "scalable-web-apps-react",
            "Best practices for building large-scale React applications, including state management, code splitting, and performance optimization.",
            "Development",
            day(2024, 11, 15),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (title, slug, excerpt, category, published))| BlogPost {
            id: sample_id(2, i as u128 + 1),
            title: title.to_string(),
            slug: slug.to_string(),
            content: excerpt.to_string(),
            excerpt: Some(excerpt.to_string()),
            category: category.to_string(),
            cover_image: None,
            is_published: true,
            published_at: Some(published),
            created_at: published,
            updated_at: published,
        })
        .collect()
}

pub fn products() -> Vec<Product> {
    let created = day(2024, 12, 1);
    let rows = [
        (
            "AI Content Generator",
            "An intelligent content generation platform powered by advanced language models. Create blog posts, social media content, and marketing copy in seconds.",
            "AI-powered content creation platform",
            strings(&["Python", "OpenAI", "React", "FastAPI"]),
            ProductCategory::Ai,
            true,
        ),
        (
            "CloudSync Dashboard",
            "A unified cloud management dashboard that integrates with AWS, Azure, and GCP. Monitor resources, manage costs, and optimize performance across multiple cloud providers.",
            "Multi-cloud management solution",
            strings(&["TypeScript", "AWS", "Azure", "Next.js"]),
            ProductCategory::Cloud,
            true,
        ),
        (
            "Resume Analyzer AI",
            "AI-powered resume analysis tool that provides actionable feedback, skill gap analysis, and job matching recommendations for job seekers.",
            "AI resume optimization tool",
            strings(&["Python", "NLP", "React", "PostgreSQL"]),
            ProductCategory::Ai,
            true,
        ),
        (
            "Smart Campus IoT",
            "An IoT solution for smart campus management. Includes automated attendance, energy management, and real-time monitoring of campus facilities.",
            "IoT-based campus automation",
            strings(&["Arduino", "MQTT", "Node.js", "MongoDB"]),
            ProductCategory::Iot,
            false,
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(
            |(i, (name, description, short, technologies, category, featured))| Product {
                id: sample_id(3, i as u128 + 1),
                name: name.to_string(),
                description: description.to_string(),
                short_description: Some(short.to_string()),
                category,
                technologies,
                demo_url: None,
                github_url: None,
                image_url: None,
                is_published: true,
                is_featured: featured,
                created_at: created,
                updated_at: created,
            },
        )
        .collect()
}

pub fn testimonials() -> Vec<Testimonial> {
    let created = day(2024, 12, 1);
    let rows = [
        (
            "Priya Sharma",
            "B.Tech Student",
            "IIT Delhi",
            "The AI/ML workshop by Innovex Arena was incredibly hands-on. I built my first neural network and gained practical skills that helped me secure an internship!",
            "AI & ML Workshop",
        ),
        (
            "Rahul Verma",
            "Software Developer",
            "TCS",
            "Participated in their hackathon and won second place. The mentorship and problem statements were industry-relevant. Highly recommend their programs!",
            "Tech Innovators Hackathon",
        ),
        (
            "Anjali Reddy",
            "MCA Student",
            "JNTU Hyderabad",
            "The cloud computing bootcamp gave me hands-on AWS experience. The trainers were experts and the certification prep was thorough.",
            "Cloud Computing Bootcamp",
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (name, role, company, content, event))| Testimonial {
            id: sample_id(4, i as u128 + 1),
            name: name.to_string(),
            role: Some(role.to_string()),
            company: Some(company.to_string()),
            content: content.to_string(),
            rating: 5,
            event_name: Some(event.to_string()),
            image_url: None,
            is_approved: true,
            is_featured: true,
            created_at: created,
            updated_at: created,
        })
        .collect()
}

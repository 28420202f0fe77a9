//! Entity builders shared by both store backends, so a record created or
//! edited through Postgres looks exactly like one made in memory.

use chrono::{DateTime, Utc};
use shared_types::{
    non_blank, normalize_email, AppError, Application, ApplicationStatus, BlogPost,
    ContactSubmission, CreateContactRequest, CreateRegistrationRequest, Event, EventRegistration,
    NewsletterSubscription, Product, RegistrationStatus, SubmitApplicationRequest, Testimonial,
    UpsertBlogPostRequest, UpsertEventRequest, UpsertProductRequest, UpsertTestimonialRequest,
};
use uuid::Uuid;

pub const EVENT_NOT_FOUND: &str = "Event not found";
pub const REGISTRATION_CLOSED: &str = "Registration for this event has closed";
pub const EVENT_FULL: &str = "This event is full";
pub const ALREADY_SUBSCRIBED: &str = "This email is already subscribed";

/// Decide whether one more registration fits.
///
/// Unpublished events are reported as missing. `seated` counts the
/// registrations that still hold a seat.
pub fn check_registration(
    event: Option<&Event>,
    seated: usize,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let event = match event {
        Some(e) if e.is_published => e,
        _ => return Err(AppError::not_found(EVENT_NOT_FOUND)),
    };

    if !event.registration_open(now) {
        return Err(AppError::conflict(REGISTRATION_CLOSED));
    }

    if let Some(max) = event.max_participants {
        if seated as i64 >= i64::from(max) {
            return Err(AppError::conflict(EVENT_FULL));
        }
    }

    Ok(())
}

pub fn new_event(req: &UpsertEventRequest, now: DateTime<Utc>) -> Event {
    apply_event(Uuid::new_v4(), now, req, now)
}

/// Replace every editable field; id and `created_at` survive.
pub fn apply_event(
    id: Uuid,
    created_at: DateTime<Utc>,
    req: &UpsertEventRequest,
    now: DateTime<Utc>,
) -> Event {
    Event {
        id,
        title: req.title.trim().to_string(),
        description: req.description.clone(),
        event_type: req.event_type,
        event_date: req.event_date,
        location: non_blank(req.location.clone()),
        max_participants: req.max_participants,
        image_url: non_blank(req.image_url.clone()),
        registration_deadline: req.registration_deadline,
        is_published: req.is_published,
        created_at,
        updated_at: now,
    }
}

pub fn new_registration(
    event_id: Uuid,
    req: &CreateRegistrationRequest,
    now: DateTime<Utc>,
) -> EventRegistration {
    EventRegistration {
        id: Uuid::new_v4(),
        event_id,
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: non_blank(req.phone.clone()),
        college: non_blank(req.college.clone()),
        status: RegistrationStatus::Pending,
        created_at: now,
    }
}

pub fn new_application(req: &SubmitApplicationRequest, now: DateTime<Utc>) -> Application {
    Application {
        id: Uuid::new_v4(),
        kind: req.kind,
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
        college: req.college.trim().to_string(),
        year_of_study: req.year_of_study.trim().to_string(),
        position: req.position.trim().to_string(),
        portfolio_url: non_blank(req.portfolio_url.clone()),
        resume_url: non_blank(req.resume_url.clone()),
        cover_letter: non_blank(req.cover_letter.clone()),
        status: ApplicationStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_contact(req: &CreateContactRequest, now: DateTime<Utc>) -> ContactSubmission {
    ContactSubmission {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        subject: non_blank(req.subject.clone()),
        message: req.message.trim().to_string(),
        is_read: false,
        created_at: now,
    }
}

pub fn new_subscription(email: &str, now: DateTime<Utc>) -> NewsletterSubscription {
    NewsletterSubscription {
        id: Uuid::new_v4(),
        email: normalize_email(email),
        is_active: true,
        subscribed_at: now,
    }
}

pub fn new_blog_post(req: &UpsertBlogPostRequest, now: DateTime<Utc>) -> BlogPost {
    apply_blog_post(Uuid::new_v4(), now, None, req, now)
}

/// `previous_published_at` is kept while the post stays published.
pub fn apply_blog_post(
    id: Uuid,
    created_at: DateTime<Utc>,
    previous_published_at: Option<DateTime<Utc>>,
    req: &UpsertBlogPostRequest,
    now: DateTime<Utc>,
) -> BlogPost {
    BlogPost {
        id,
        title: req.title.trim().to_string(),
        slug: req.effective_slug(),
        content: req.content.clone(),
        excerpt: non_blank(req.excerpt.clone()),
        category: req.category.clone(),
        cover_image: non_blank(req.cover_image.clone()),
        is_published: req.is_published,
        published_at: BlogPost::next_published_at(previous_published_at, req.is_published, now),
        created_at,
        updated_at: now,
    }
}

pub fn new_product(req: &UpsertProductRequest, now: DateTime<Utc>) -> Product {
    apply_product(Uuid::new_v4(), now, req, now)
}

pub fn apply_product(
    id: Uuid,
    created_at: DateTime<Utc>,
    req: &UpsertProductRequest,
    now: DateTime<Utc>,
) -> Product {
    Product {
        id,
        name: req.name.trim().to_string(),
        description: req.description.clone(),
        short_description: non_blank(req.short_description.clone()),
        category: req.category,
        technologies: req.clean_technologies(),
        demo_url: non_blank(req.demo_url.clone()),
        github_url: non_blank(req.github_url.clone()),
        image_url: non_blank(req.image_url.clone()),
        is_published: req.is_published,
        is_featured: req.is_featured,
        created_at,
        updated_at: now,
    }
}

pub fn new_testimonial(req: &UpsertTestimonialRequest, now: DateTime<Utc>) -> Testimonial {
    apply_testimonial(Uuid::new_v4(), now, req, now)
}

pub fn apply_testimonial(
    id: Uuid,
    created_at: DateTime<Utc>,
    req: &UpsertTestimonialRequest,
    now: DateTime<Utc>,
) -> Testimonial {
    Testimonial {
        id,
        name: req.name.trim().to_string(),
        role: non_blank(req.role.clone()),
        company: non_blank(req.company.clone()),
        content: req.content.clone(),
        rating: req.rating,
        event_name: non_blank(req.event_name.clone()),
        image_url: non_blank(req.image_url.clone()),
        is_approved: req.is_approved,
        is_featured: req.is_featured,
        created_at,
        updated_at: now,
    }
}

pub mod article;
pub mod client;
pub mod admin;
pub mod consultation;
pub mod contact_info;
pub mod contact_message;
pub mod country;
pub mod program;
pub mod site_settings;
pub mod testimonial;
pub mod university;

pub use article::{Article, CreateArticle, UpdateArticle};
pub use client::{Client, CreateClient, UpdateClient};
pub use admin::{Admin, CreateAdmin};
pub use consultation::{Consultation, ConsultationStatus, CreateConsultation, UpdateConsultationStatus};
pub use contact_info::{ContactInfo, SaveContactInfo};
pub use contact_message::{ContactMessage, CreateContactMessage, MessageStatus, UpdateMessageStatus};
pub use country::{Country, CreateCountry, UpdateCountry};
pub use program::{CreateProgram, Program, UpdateProgram};
pub use site_settings::{SaveSiteSettings, SiteSettings};
pub use testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
pub use university::{CreateUniversity, University, UpdateUniversity};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Тип ресурса CMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Blog,
    News,
    Service,
    Project,
    AboutSection,
    Course,
    Testimonial,
    Contact,
    Consultation,
    Redirect,
    Statistic,
    ContactInfo,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::Blog,
        ResourceKind::News,
        ResourceKind::Service,
        ResourceKind::Project,
        ResourceKind::AboutSection,
        ResourceKind::Course,
        ResourceKind::Testimonial,
        ResourceKind::Contact,
        ResourceKind::Consultation,
        ResourceKind::Redirect,
        ResourceKind::Statistic,
        ResourceKind::ContactInfo,
    ];

    /// Код ресурса (используется в URL дашборда)
    pub fn code(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blog",
            ResourceKind::News => "news",
            ResourceKind::Service => "service",
            ResourceKind::Project => "project",
            ResourceKind::AboutSection => "about_section",
            ResourceKind::Course => "course",
            ResourceKind::Testimonial => "testimonial",
            ResourceKind::Contact => "contact",
            ResourceKind::Consultation => "consultation",
            ResourceKind::Redirect => "redirect",
            ResourceKind::Statistic => "statistic",
            ResourceKind::ContactInfo => "contact_info",
        }
    }

    /// Путь REST-ресурса на backend
    pub fn api_path(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "/api/blogs",
            ResourceKind::News => "/api/news",
            ResourceKind::Service => "/api/services",
            ResourceKind::Project => "/api/projects",
            ResourceKind::AboutSection => "/api/about-sections",
            ResourceKind::Course => "/api/courses",
            ResourceKind::Testimonial => "/api/testimonials",
            ResourceKind::Contact => "/api/contacts",
            ResourceKind::Consultation => "/api/consultations",
            ResourceKind::Redirect => "/api/redirects",
            ResourceKind::Statistic => "/api/statistics",
            ResourceKind::ContactInfo => "/api/contact-info",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Blog",
            ResourceKind::News => "News",
            ResourceKind::Service => "Services",
            ResourceKind::Project => "Projects",
            ResourceKind::AboutSection => "About sections",
            ResourceKind::Course => "Courses",
            ResourceKind::Testimonial => "Testimonials",
            ResourceKind::Contact => "Contacts",
            ResourceKind::Consultation => "Consultations",
            ResourceKind::Redirect => "Redirects",
            ResourceKind::Statistic => "Statistics",
            ResourceKind::ContactInfo => "Contact info",
        }
    }

    /// Входящие заявки (контакты, консультации) только просматриваются и удаляются
    pub fn has_form(&self) -> bool {
        !matches!(self, ResourceKind::Contact | ResourceKind::Consultation)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.code() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown resource: {}", s))
    }
}

//! Informational cards shown on the campus guide page.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideCard {
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
    pub button_text: &'static str,
    pub href: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_button_text: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_href: Option<&'static str>,
}

pub const GUIDE_CARDS: &[GuideCard] = &[
    GuideCard {
        title: "What to Bring",
        description: "What to Bring to Whitworth",
        content: "We're glad you will be a part of our community. Following are lists of items you'll need to bring to Whitworth along with items you may want to bring with you when you arrive on campus. Additionally, please read What's Provided for information about what is already in your room and What Not to Bring, which details items not allowed in the residence halls.",
        button_text: "Learn More",
        href: "https://www.whitworth.edu/cms/administration/residence-life-and-housing/what-to-bring/",
        second_button_text: None,
        second_href: None,
    },
    GuideCard {
        title: "Health Services",
        description: "Campus health and wellness resources",
        content: "Access health services, counseling, and wellness programs. Located in convenient campus locations to support your physical and mental well-being.",
        button_text: "Show Locations",
        href: "/map?category=Health",
        second_button_text: Some("Learn More"),
        second_href: Some("https://www.whitworth.edu/cms/student-life/health-services/"),
    },
    GuideCard {
        title: "Vehicle Registration & Parking",
        description: "A campus should be a 'park for the mind' where green spaces are to be cherished and natural beauty maintained.",
        content: "All personal vehicles parked on campus must be registered with security services. Faculty, staff and students should display a valid parking permit on their personal vehicle (including motorcycles) at all times.",
        button_text: "Learn More",
        href: "https://www.whitworth.edu/cms/administration/security-services/vehicle-registration-and-parking/",
        second_button_text: None,
        second_href: None,
    },
    GuideCard {
        title: "Campus Dining Services (Sodexo)",
        description: "Meal plans, menus, and dining hours",
        content: "Explore dining options provided by Sodexo, including daily menus, meal plan information, nutrition facts, and dining hall hours. Find what's being served today at the HUB and other campus locations.",
        button_text: "View Menu",
        href: "https://whitworthdining.sodexomyway.com/en-us/",
        second_button_text: None,
        second_href: None,
    },
    GuideCard {
        title: "Food & Drink",
        description: "Dining options and cafes across campus",
        content: "Explore various dining locations including the HUB, Pines Cafe, and other campus eateries. Find meal plans, grab-and-go options, and coffee shops.",
        button_text: "Show Locations",
        href: "/map?category=Food%20%26%20Drink",
        second_button_text: None,
        second_href: None,
    },
    GuideCard {
        title: "HUB",
        description: "Central hub for dining, studying, and socializing",
        content: "The HUB is the heart of campus life, offering multiple dining options, study spaces, and meeting areas. Perfect for grabbing a meal between classes or collaborating on group projects.",
        button_text: "View on Map",
        href: "/map?id=hub",
        second_button_text: None,
        second_href: None,
    },
    GuideCard {
        title: "Study Spaces",
        description: "Quiet areas and libraries for focused studying",
        content: "Find the perfect study spot across campus. From the main library to quiet corners in academic buildings, discover spaces that match your study style and needs.",
        button_text: "Show Locations",
        href: "/map?category=Study",
        second_button_text: None,
        second_href: None,
    },
    GuideCard {
        title: "Library",
        description: "Main campus library with extensive resources",
        content: "Access books, research databases, study rooms, and computer labs. The library offers both quiet study areas and collaborative spaces for group work.",
        button_text: "View on Map",
        href: "/map?id=library",
        second_button_text: None,
        second_href: None,
    },
];

use serde::{Deserialize, Serialize};

pub const MAX_RATING: i32 = 5;
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg";

/// A client quote shown one at a time in the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub quote: String,
    pub author: String,
    pub title: String,
    pub company: String,
    /// Not validated; clamped to `0..=5` when rendered.
    pub rating: i32,
    pub avatar_url: String,
}

impl Testimonial {
    pub fn stars(&self) -> u8 {
        self.rating.clamp(0, MAX_RATING) as u8
    }

    pub fn avatar(&self) -> &str {
        if self.avatar_url.is_empty() {
            PLACEHOLDER_AVATAR
        } else {
            &self.avatar_url
        }
    }
}

pub fn default_testimonials() -> Vec<Testimonial> {
    let avatar = "/placeholder.svg?height=80&width=80";
    vec![
        Testimonial {
            id: 1,
            quote: "Fahad's work on our e-commerce platform was exceptional. He delivered a robust, \
                    scalable solution with a beautiful user interface. Highly recommend!"
                .to_string(),
            author: "Jane Doe".to_string(),
            title: "CEO".to_string(),
            company: "FashionForward Inc.".to_string(),
            rating: 5,
            avatar_url: avatar.to_string(),
        },
        Testimonial {
            id: 2,
            quote: "The task management app Fahad built transformed our team's productivity. His \
                    attention to detail and real-time features are outstanding."
                .to_string(),
            author: "John Smith".to_string(),
            title: "CTO".to_string(),
            company: "Productivity Solutions".to_string(),
            rating: 5,
            avatar_url: avatar.to_string(),
        },
        Testimonial {
            id: 3,
            quote: "Fahad's design skills are top-notch. He captured our brand's essence perfectly \
                    and delivered a stunning brand identity. A true professional!"
                .to_string(),
            author: "Emily White".to_string(),
            title: "Marketing Director".to_string(),
            company: "Creative Spark Agency".to_string(),
            rating: 4,
            avatar_url: avatar.to_string(),
        },
        Testimonial {
            id: 4,
            quote: "Working with Fahad was a breeze. He's highly skilled, communicative, and \
                    delivered our mobile app ahead of schedule. Fantastic experience!"
                .to_string(),
            author: "Michael Brown".to_string(),
            title: "Founder".to_string(),
            company: "FitLife Apps".to_string(),
            rating: 5,
            avatar_url: avatar.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rating(rating: i32) -> Testimonial {
        Testimonial {
            rating,
            ..default_testimonials().remove(0)
        }
    }

    #[test]
    fn test_stars_clamped_to_range() {
        assert_eq!(with_rating(-3).stars(), 0);
        assert_eq!(with_rating(4).stars(), 4);
        assert_eq!(with_rating(11).stars(), 5);
    }

    #[test]
    fn test_empty_avatar_uses_placeholder() {
        let mut t = with_rating(5);
        t.avatar_url.clear();
        assert_eq!(t.avatar(), PLACEHOLDER_AVATAR);
    }

    #[test]
    fn test_default_list_is_non_empty_with_unique_ids() {
        let list = default_testimonials();
        assert_eq!(list.len(), 4);
        let mut ids: Vec<u32> = list.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// The résumé record laid out by the document builder. Read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub title: String,
    pub contact: Contact,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
}

impl ResumeDocument {
    /// Download file name: every whitespace character of the name becomes `-`.
    /// Path separators, quotes and other control characters are dropped.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .name
            .chars()
            .filter_map(|c| match c {
                c if c.is_whitespace() => Some('-'),
                '/' | '\\' | '"' => None,
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect();
        format!("{stem}-Resume.pdf")
    }

    /// The compiled-in résumé served by the portfolio.
    pub fn sample() -> Self {
        ResumeDocument {
            name: "Fahad Khan".to_string(),
            title: "Full-Stack Developer & UI/UX Designer".to_string(),
            contact: Contact {
                email: "fahadkhan233144@gmail.com".to_string(),
                phone: "+92 (310) 477-9591".to_string(),
                location: "Lahore, Pakistan".to_string(),
            },
            summary: "Highly motivated Full-Stack Developer and UI/UX Designer with 5+ years of \
                experience crafting robust web applications and intuitive user interfaces. \
                Proficient in modern frontend and backend technologies, with a strong passion for \
                clean code, innovative solutions, and collaborative development. Eager to \
                contribute to impactful projects and continuously learn new technologies."
                .to_string(),
            experience: vec![
                Experience {
                    title: "Senior Full-Stack Developer".to_string(),
                    company: "TechCorp".to_string(),
                    period: "Jan 2021 - Present".to_string(),
                    description: strings(&[
                        "Led development of scalable web applications using React, Node.js, and PostgreSQL.",
                        "Implemented RESTful APIs and integrated third-party services (e.g., Stripe).",
                        "Mentored junior developers and conducted code reviews to ensure high code quality.",
                    ]),
                },
                Experience {
                    title: "Frontend Developer".to_string(),
                    company: "StartupXYZ".to_string(),
                    period: "Mar 2019 - Dec 2020".to_string(),
                    description: strings(&[
                        "Developed responsive user interfaces with React and TypeScript.",
                        "Collaborated with design team to translate UI/UX wireframes into functional components.",
                        "Optimized application performance and improved user experience.",
                    ]),
                },
            ],
            education: vec![Education {
                degree: "Bachelor of Science in Computer Science".to_string(),
                institution: "University of South Asia, Lahore".to_string(),
                period: "2021 - 2025".to_string(),
            }],
            skills: vec![
                SkillCategory {
                    category: "Frontend".to_string(),
                    items: strings(&[
                        "React",
                        "Next.js",
                        "TypeScript",
                        "Tailwind CSS",
                        "HTML5",
                        "CSS3",
                        "SASS",
                    ]),
                },
                SkillCategory {
                    category: "Backend".to_string(),
                    items: strings(&[
                        "Node.js",
                        "Python",
                        "Django",
                        "PostgreSQL",
                        "MongoDB",
                        "REST APIs",
                        "GraphQL",
                    ]),
                },
                SkillCategory {
                    category: "Design".to_string(),
                    items: strings(&["Figma", "Adobe XD", "UI/UX Design", "Responsive Design"]),
                },
                SkillCategory {
                    category: "Tools".to_string(),
                    items: strings(&["Git", "Docker", "AWS", "Vercel", "Jest", "Cypress"]),
                },
            ],
            projects: vec![
                Project {
                    title: "E-Commerce Platform".to_string(),
                    description: "Developed a full-stack e-commerce solution with real-time \
                        inventory and secure payment integration."
                        .to_string(),
                    technologies: strings(&["React", "Node.js", "PostgreSQL", "Stripe"]),
                },
                Project {
                    title: "Task Management App".to_string(),
                    description: "Built a collaborative task management app with real-time \
                        updates and drag-and-drop features."
                        .to_string(),
                    technologies: strings(&["React", "TypeScript", "Firebase"]),
                },
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

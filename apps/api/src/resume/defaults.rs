use crate::models::resume::{Education, Experience, PersonalInfo, ResumeData};

/// Placeholder resume shown before the user has entered anything.
pub fn default_resume() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: Some("123 Main St, New York, NY 10001".to_string()),
            title: "Software Engineer".to_string(),
            summary: "Experienced software engineer with a passion for creating innovative solutions."
                .to_string(),
            profile_image: None,
        },
        experience: vec![
            Experience {
                id: "exp1".to_string(),
                company: "Tech Solutions Inc.".to_string(),
                position: "Senior Software Engineer".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Present".to_string(),
                description: "Led development of cloud-based applications using React and Node.js. \
                              Improved system performance by 40%."
                    .to_string(),
                location: None,
            },
            Experience {
                id: "exp2".to_string(),
                company: "Digital Innovations".to_string(),
                position: "Software Developer".to_string(),
                start_date: "Mar 2017".to_string(),
                end_date: "Dec 2019".to_string(),
                description: "Developed and maintained web applications. \
                              Collaborated with UX designers to implement user-friendly interfaces."
                    .to_string(),
                location: None,
            },
        ],
        education: vec![
            Education {
                id: "edu1".to_string(),
                school: "University of Technology".to_string(),
                degree: "Master of Computer Science".to_string(),
                date: "2015 - 2017".to_string(),
            },
            Education {
                id: "edu2".to_string(),
                school: "State University".to_string(),
                degree: "Bachelor of Science in Software Engineering".to_string(),
                date: "2011 - 2015".to_string(),
            },
        ],
        skills: [
            "JavaScript",
            "React",
            "Node.js",
            "TypeScript",
            "MongoDB",
            "Express",
            "REST APIs",
            "Git",
            "Agile Methodologies",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    }
}

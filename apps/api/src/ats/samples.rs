//! Prefilled inputs for the ATS checker form.

pub const SAMPLE_JOB_DESCRIPTION: &str = r#"Senior Full Stack Developer

Company: TechInnovate Solutions
Location: Remote (US)

Job Description:
We are seeking a Senior Full Stack Developer to join our growing team. The ideal candidate will have extensive experience with React, Node.js, and database technologies. You will be responsible for developing and maintaining web applications, collaborating with cross-functional teams, and mentoring junior developers.

Requirements:
- 5+ years of experience in full stack development
- Proficiency in React, Redux, and frontend development
- Strong knowledge of Node.js, Express, and RESTful APIs
- Experience with MongoDB or other NoSQL databases
- Familiarity with AWS or other cloud services
- Strong problem-solving skills and attention to detail
- Excellent communication and teamwork abilities

Responsibilities:
- Design, develop, and maintain web applications
- Collaborate with UX/UI designers to implement user-friendly interfaces
- Write clean, efficient, and well-documented code
- Participate in code reviews and architectural discussions
- Troubleshoot and debug applications
- Stay up-to-date with emerging trends and technologies

Benefits:
- Competitive salary and benefits package
- Flexible work schedule
- Professional development opportunities
- Collaborative and innovative work environment
"#;

pub const SAMPLE_RESUME_TEXT: &str = r#"JOHN DOE
Software Developer
john.doe@example.com | (555) 123-4567 | linkedin.com/in/johndoe

PROFESSIONAL SUMMARY
Versatile Software Developer with 6 years of experience in full stack development. Skilled in React, Node.js, and MongoDB. Passionate about creating efficient, user-friendly applications.

EXPERIENCE
Senior Developer, Tech Solutions Inc.
January 2020 - Present
- Developed and maintained multiple React-based web applications
- Implemented RESTful APIs using Node.js and Express
- Collaborated with design team to create responsive user interfaces
- Improved application performance by 35% through code optimization

Software Developer, Digital Innovations
March 2017 - December 2019
- Built and maintained e-commerce platforms using MERN stack
- Designed and implemented database schemas in MongoDB
- Participated in Agile development processes
- Mentored junior developers on best practices

SKILLS
- Programming: JavaScript, TypeScript, HTML, CSS
- Frontend: React, Redux, Bootstrap, Tailwind CSS
- Backend: Node.js, Express, RESTful APIs
- Database: MongoDB, PostgreSQL
- Tools: Git, Docker, AWS, Jest

EDUCATION
Bachelor of Science in Computer Science
University of Technology, 2017
"#;

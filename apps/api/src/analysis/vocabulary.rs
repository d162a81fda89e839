//! Skill vocabulary: the static canonical-name → synonyms table, plus the
//! `SkillSet` type that every detection step produces.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::normalize::normalize;

/// A set of canonical skill names. Iteration order is lexical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        self.0.difference(&other.0).cloned().collect()
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        self.0.union(&other.0).cloned().collect()
    }

    pub fn is_disjoint(&self, other: &SkillSet) -> bool {
        self.0.is_disjoint(&other.0)
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One vocabulary row with synonyms pre-normalized into token sequences.
#[derive(Debug, Clone)]
pub struct VocabularyEntry {
    pub canonical: &'static str,
    pub display: &'static str,
    pub synonyms: Vec<Vec<String>>,
}

/// Immutable skill vocabulary, built once at startup.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<VocabularyEntry>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from `(canonical, display, synonyms)` rows.
    /// Synonyms that normalize to nothing are dropped.
    pub fn from_rows(rows: &[(&'static str, &'static str, &[&str])]) -> Self {
        let entries = rows
            .iter()
            .map(|&(canonical, display, synonyms)| VocabularyEntry {
                canonical,
                display,
                synonyms: synonyms
                    .iter()
                    .map(|s| normalize(s))
                    .filter(|tokens| !tokens.is_empty())
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::from_rows(BUILTIN_SKILLS)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.iter().any(|e| e.canonical == canonical)
    }

    /// Human-facing label for a canonical name. Unknown names are returned as-is.
    pub fn display_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|e| e.canonical == canonical)
            .map(|e| e.display)
            .unwrap_or(canonical)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in table
// ────────────────────────────────────────────────────────────────────────────

/// (canonical, display, synonyms). Every synonym is matched as a whole-token run.
///
/// Skills whose bare name is an everyday English word (go, react, excel, less,
/// express, rest) only list their unambiguous spellings.
pub const BUILTIN_SKILLS: &[(&str, &str, &[&str])] = &[
    // Languages
    ("python", "Python", &["python"]),
    ("java", "Java", &["java"]),
    ("javascript", "JavaScript", &["javascript", "ecmascript", "es6"]),
    ("typescript", "TypeScript", &["typescript"]),
    ("c++", "C++", &["c++", "cpp"]),
    ("c#", "C#", &["c#", "csharp"]),
    (".net", ".NET", &[".net", "dotnet", ".net core"]),
    ("go", "Go", &["golang", "go lang"]),
    ("rust", "Rust", &["rust"]),
    ("swift", "Swift", &["swift"]),
    ("kotlin", "Kotlin", &["kotlin"]),
    ("sql", "SQL", &["sql"]),
    ("bash", "Bash", &["bash"]),
    ("shell scripting", "Shell Scripting", &["shell scripting", "shell script", "shell scripts"]),
    ("powershell", "PowerShell", &["powershell"]),
    // Web
    ("html", "HTML", &["html", "html5"]),
    ("css", "CSS", &["css", "css3"]),
    ("sass", "Sass", &["sass", "scss"]),
    ("bootstrap", "Bootstrap", &["bootstrap"]),
    ("tailwind css", "Tailwind CSS", &["tailwind", "tailwind css", "tailwindcss"]),
    ("material ui", "Material UI", &["material ui", "material-ui", "mui"]),
    ("react", "React", &["react.js", "reactjs", "react js"]),
    ("angular", "Angular", &["angular", "angularjs"]),
    ("vue.js", "Vue.js", &["vue", "vue.js", "vuejs"]),
    ("svelte", "Svelte", &["svelte", "sveltekit"]),
    ("next.js", "Next.js", &["next.js", "nextjs"]),
    ("nuxt", "Nuxt", &["nuxt", "nuxt.js"]),
    ("node.js", "Node.js", &["node.js", "nodejs"]),
    ("express", "Express", &["express.js", "expressjs"]),
    ("django", "Django", &["django"]),
    ("flask", "Flask", &["flask"]),
    ("fastapi", "FastAPI", &["fastapi"]),
    ("spring boot", "Spring Boot", &["spring boot", "springboot"]),
    ("laravel", "Laravel", &["laravel"]),
    ("ruby on rails", "Ruby on Rails", &["ruby on rails", "rails"]),
    ("rest api", "REST APIs", &["rest api", "rest apis", "restful", "restful api"]),
    ("graphql", "GraphQL", &["graphql"]),
    ("microservices", "Microservices", &["microservices", "microservice"]),
    ("websocket", "WebSockets", &["websocket", "websockets"]),
    // Mobile
    ("react native", "React Native", &["react native"]),
    ("flutter", "Flutter", &["flutter"]),
    ("xamarin", "Xamarin", &["xamarin"]),
    // Data stores
    ("mongodb", "MongoDB", &["mongodb", "mongo"]),
    ("postgresql", "PostgreSQL", &["postgresql", "postgres"]),
    ("mysql", "MySQL", &["mysql"]),
    ("redis", "Redis", &["redis"]),
    ("elasticsearch", "Elasticsearch", &["elasticsearch", "elastic search"]),
    ("cassandra", "Cassandra", &["cassandra"]),
    ("dynamodb", "DynamoDB", &["dynamodb"]),
    // Messaging
    ("kafka", "Kafka", &["kafka", "apache kafka"]),
    ("rabbitmq", "RabbitMQ", &["rabbitmq"]),
    ("celery", "Celery", &["celery"]),
    // Cloud & infrastructure
    ("aws", "AWS", &["aws", "amazon web services"]),
    ("aws lambda", "AWS Lambda", &["aws lambda"]),
    ("aws s3", "AWS S3", &["aws s3", "s3"]),
    ("ec2", "EC2", &["ec2"]),
    ("azure", "Azure", &["azure", "microsoft azure"]),
    ("azure devops", "Azure DevOps", &["azure devops"]),
    ("gcp", "Google Cloud", &["gcp", "google cloud", "google cloud platform"]),
    ("docker", "Docker", &["docker"]),
    ("kubernetes", "Kubernetes", &["kubernetes", "k8s"]),
    ("terraform", "Terraform", &["terraform"]),
    ("ansible", "Ansible", &["ansible"]),
    ("linux", "Linux", &["linux"]),
    // Tooling
    ("git", "Git", &["git"]),
    ("github", "GitHub", &["github"]),
    ("gitlab", "GitLab", &["gitlab"]),
    ("bitbucket", "Bitbucket", &["bitbucket"]),
    ("github actions", "GitHub Actions", &["github actions"]),
    ("jenkins", "Jenkins", &["jenkins"]),
    (
        "ci/cd",
        "CI/CD",
        &["ci/cd", "continuous integration", "continuous delivery", "continuous deployment"],
    ),
    ("jira", "Jira", &["jira"]),
    ("confluence", "Confluence", &["confluence"]),
    // Data & ML
    ("machine learning", "Machine Learning", &["machine learning", "ml"]),
    ("deep learning", "Deep Learning", &["deep learning"]),
    ("nlp", "NLP", &["nlp", "natural language processing"]),
    ("computer vision", "Computer Vision", &["computer vision"]),
    ("tensorflow", "TensorFlow", &["tensorflow"]),
    ("pytorch", "PyTorch", &["pytorch"]),
    ("scikit-learn", "scikit-learn", &["scikit-learn", "sklearn"]),
    ("pandas", "pandas", &["pandas"]),
    ("numpy", "NumPy", &["numpy"]),
    ("matplotlib", "Matplotlib", &["matplotlib"]),
    ("data analysis", "Data Analysis", &["data analysis", "data analytics"]),
    ("data science", "Data Science", &["data science"]),
    ("power bi", "Power BI", &["power bi", "powerbi"]),
    ("tableau", "Tableau", &["tableau"]),
    ("excel", "Excel", &["microsoft excel", "ms excel", "excel spreadsheets"]),
    // Design
    ("figma", "Figma", &["figma"]),
    ("adobe xd", "Adobe XD", &["adobe xd"]),
    ("ui/ux", "UI/UX", &["ui/ux", "ux", "user experience"]),
    ("wireframing", "Wireframing", &["wireframing", "wireframes"]),
    ("prototyping", "Prototyping", &["prototyping"]),
    // Process & soft skills
    ("agile", "Agile", &["agile"]),
    ("scrum", "Scrum", &["scrum"]),
    ("kanban", "Kanban", &["kanban"]),
    ("project management", "Project Management", &["project management"]),
    ("leadership", "Leadership", &["leadership"]),
    ("communication", "Communication", &["communication", "communication skills"]),
    ("teamwork", "Teamwork", &["teamwork", "team player"]),
    ("problem solving", "Problem Solving", &["problem solving"]),
    ("critical thinking", "Critical Thinking", &["critical thinking"]),
    ("time management", "Time Management", &["time management"]),
];

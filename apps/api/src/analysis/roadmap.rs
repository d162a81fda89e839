//! Learning roadmap: maps skill gaps to curated free resources.
//!
//! Entries are ordered by descending `priority` (how often the skill shows up in
//! reference job descriptions), ties broken by canonical name.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::vocabulary::{SkillSet, SkillVocabulary};

/// A single free learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
}

/// Static roadmap row for one canonical skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadmapEntry {
    pub skill: &'static str,
    /// Estimated study time, e.g. "3-5".
    pub weeks: &'static str,
    pub priority: u16,
    pub resources: &'static [Resource],
}

/// Read-only roadmap lookup table. Holds one row per vocabulary skill.
#[derive(Debug, Clone)]
pub struct RoadmapTable {
    entries: Vec<RoadmapEntry>,
}

impl RoadmapTable {
    /// Curated rows from `BUILTIN_ROADMAP`, plus a generic row for every other
    /// skill in `vocabulary` so no detectable gap goes without a plan.
    pub fn for_vocabulary(vocabulary: &SkillVocabulary) -> Self {
        let mut entries = BUILTIN_ROADMAP.to_vec();
        for skill in vocabulary.entries() {
            if !entries.iter().any(|e| e.skill == skill.canonical) {
                entries.push(RoadmapEntry {
                    skill: skill.canonical,
                    weeks: FALLBACK_WEEKS,
                    priority: FALLBACK_PRIORITY,
                    resources: FALLBACK_RESOURCES,
                });
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[RoadmapEntry] {
        &self.entries
    }

    pub fn get(&self, skill: &str) -> Option<&RoadmapEntry> {
        self.entries.iter().find(|e| e.skill == skill)
    }

    /// Table entries for `skills`, highest priority first. Names outside the
    /// vocabulary are skipped.
    pub fn prioritize<'a>(&'a self, skills: &SkillSet) -> impl Iterator<Item = &'a RoadmapEntry> {
        let mut picked: Vec<&RoadmapEntry> = skills.iter().filter_map(|s| self.get(s)).collect();
        picked.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.skill.cmp(b.skill)));
        picked.into_iter()
    }
}

/// Builds the ordered roadmap for a set of missing skills.
pub fn build_roadmap(missing: &SkillSet, table: &RoadmapTable) -> Vec<RoadmapEntry> {
    table.prioritize(missing).copied().collect()
}

/// Renders the roadmap as Markdown, dated `generated_on`.
pub fn render_markdown(
    entries: &[RoadmapEntry],
    vocabulary: &SkillVocabulary,
    generated_on: NaiveDate,
) -> String {
    let mut md = String::from("# Personalized Skills Roadmap\n\n");
    md.push_str(&format!(
        "*Generated on {}*\n\n---\n\n",
        generated_on.format("%B %d, %Y")
    ));

    if entries.is_empty() {
        md.push_str("No skill gaps found. Keep building projects!\n");
        return md;
    }

    for (i, entry) in entries.iter().enumerate() {
        let name = vocabulary.display_name(entry.skill);
        md.push_str(&format!("## {}. {name}\n\n", i + 1));
        md.push_str(&format!("**Estimated Time:** {} weeks\n\n", entry.weeks));
        md.push_str("**Free Resources:**\n");
        for r in entry.resources {
            md.push_str(&format!("  - [{}]({})\n", r.title, r.url));
        }
        md.push_str("\n**Action Plan:**\n");
        md.push_str(&format!("  1. **Week 1**: complete a beginner tutorial on {name}\n"));
        md.push_str(&format!("  2. **Week 2**: build a small hands-on project using {name}\n"));
        md.push_str("  3. **Week 3+**: publish the project on GitHub and update your CV\n\n");
        md.push_str("---\n\n");
    }

    md.push_str("> **Tip:** focus on 2-3 skills at a time. Consistency beats intensity.\n");
    md
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in table
// ────────────────────────────────────────────────────────────────────────────

macro_rules! res {
    ($title:expr, $url:expr) => {
        Resource {
            title: $title,
            url: $url,
        }
    };
}

const FALLBACK_WEEKS: &str = "2-4";
const FALLBACK_PRIORITY: u16 = 10;
const FALLBACK_RESOURCES: &[Resource] = &[
    res!("YouTube Tutorials", "https://www.youtube.com/"),
    res!("freeCodeCamp", "https://www.freecodecamp.org/learn/"),
    res!("Udemy (free courses)", "https://www.udemy.com/courses/free/"),
];

pub const BUILTIN_ROADMAP: &[RoadmapEntry] = &[
    RoadmapEntry {
        skill: "python",
        weeks: "3-5",
        priority: 95,
        resources: &[
            res!("Python.org Tutorial", "https://docs.python.org/3/tutorial/"),
            res!("freeCodeCamp Python", "https://www.freecodecamp.org/learn/scientific-computing-with-python/"),
            res!("Automate the Boring Stuff", "https://automatetheboringstuff.com/"),
        ],
    },
    RoadmapEntry {
        skill: "javascript",
        weeks: "4-6",
        priority: 92,
        resources: &[
            res!("JavaScript.info", "https://javascript.info/"),
            res!("MDN Web Docs", "https://developer.mozilla.org/en-US/docs/Web/JavaScript"),
            res!("freeCodeCamp JavaScript", "https://www.freecodecamp.org/learn/javascript-algorithms-and-data-structures-v8/"),
        ],
    },
    RoadmapEntry {
        skill: "sql",
        weeks: "2-3",
        priority: 90,
        resources: &[
            res!("SQLBolt", "https://sqlbolt.com/"),
            res!("W3Schools SQL", "https://www.w3schools.com/sql/"),
            res!("Khan Academy SQL", "https://www.khanacademy.org/computing/computer-programming/sql"),
        ],
    },
    RoadmapEntry {
        skill: "git",
        weeks: "1-2",
        priority: 88,
        resources: &[
            res!("Pro Git Book", "https://git-scm.com/book/en/v2"),
            res!("GitHub Skills", "https://skills.github.com/"),
            res!("Atlassian Git Tutorial", "https://www.atlassian.com/git/tutorials"),
        ],
    },
    RoadmapEntry {
        skill: "aws",
        weeks: "6-8",
        priority: 86,
        resources: &[
            res!("AWS Skill Builder", "https://skillbuilder.aws/"),
            res!("AWS Free Tier", "https://aws.amazon.com/free/"),
            res!("freeCodeCamp AWS Cloud Practitioner", "https://www.freecodecamp.org/news/aws-certified-cloud-practitioner-certification-study-course-pass-the-exam/"),
        ],
    },
    RoadmapEntry {
        skill: "java",
        weeks: "5-7",
        priority: 85,
        resources: &[
            res!("Dev.java Learn", "https://dev.java/learn/"),
            res!("MOOC.fi Java Programming", "https://java-programming.mooc.fi/"),
        ],
    },
    RoadmapEntry {
        skill: "docker",
        weeks: "2-3",
        priority: 84,
        resources: &[
            res!("Docker Docs: Get Started", "https://docs.docker.com/get-started/"),
            res!("Play with Docker", "https://labs.play-with-docker.com/"),
        ],
    },
    RoadmapEntry {
        skill: "react",
        weeks: "3-4",
        priority: 82,
        resources: &[
            res!("React.dev Tutorial", "https://react.dev/learn"),
            res!("freeCodeCamp Front End Libraries", "https://www.freecodecamp.org/learn/front-end-development-libraries/"),
            res!("Scrimba Learn React", "https://scrimba.com/learn-react-c0e"),
        ],
    },
    RoadmapEntry {
        skill: "typescript",
        weeks: "2-3",
        priority: 80,
        resources: &[
            res!("TypeScript Handbook", "https://www.typescriptlang.org/docs/handbook/intro.html"),
            res!("Total TypeScript Beginners", "https://www.totaltypescript.com/tutorials/beginners-typescript"),
        ],
    },
    RoadmapEntry {
        skill: "kubernetes",
        weeks: "4-6",
        priority: 76,
        resources: &[
            res!("Kubernetes Basics", "https://kubernetes.io/docs/tutorials/kubernetes-basics/"),
            res!("KodeKloud Free Labs", "https://kodekloud.com/free-labs/kubernetes"),
            res!("CNCF Landscape", "https://landscape.cncf.io/"),
        ],
    },
    RoadmapEntry {
        skill: "ci/cd",
        weeks: "2-3",
        priority: 74,
        resources: &[
            res!("GitHub Actions Docs", "https://docs.github.com/en/actions"),
            res!("GitLab CI/CD Docs", "https://docs.gitlab.com/ee/ci/"),
            res!("Jenkins Tutorials", "https://www.jenkins.io/doc/tutorials/"),
        ],
    },
    RoadmapEntry {
        skill: "linux",
        weeks: "3-4",
        priority: 72,
        resources: &[
            res!("Linux Journey", "https://linuxjourney.com/"),
            res!("The Linux Command Line", "https://linuxcommand.org/tlcl.php"),
            res!("OverTheWire Bandit", "https://overthewire.org/wargames/bandit/"),
        ],
    },
    RoadmapEntry {
        skill: "node.js",
        weeks: "3-4",
        priority: 70,
        resources: &[
            res!("Node.js Learn", "https://nodejs.org/en/learn"),
            res!("The Odin Project NodeJS", "https://www.theodinproject.com/paths/full-stack-javascript/courses/nodejs"),
        ],
    },
    RoadmapEntry {
        skill: "azure",
        weeks: "5-7",
        priority: 68,
        resources: &[
            res!("Microsoft Learn: Azure Fundamentals", "https://learn.microsoft.com/en-us/training/azure/"),
            res!("Azure Free Account", "https://azure.microsoft.com/en-us/free/"),
        ],
    },
    RoadmapEntry {
        skill: "rest api",
        weeks: "1-2",
        priority: 66,
        resources: &[
            res!("MDN HTTP Guide", "https://developer.mozilla.org/en-US/docs/Web/HTTP"),
            res!("REST API Tutorial", "https://restfulapi.net/"),
        ],
    },
    RoadmapEntry {
        skill: "gcp",
        weeks: "5-7",
        priority: 64,
        resources: &[
            res!("Google Cloud Skills Boost", "https://www.cloudskillsboost.google/"),
            res!("Google Cloud Free Tier", "https://cloud.google.com/free"),
        ],
    },
    RoadmapEntry {
        skill: "machine learning",
        weeks: "8-12",
        priority: 62,
        resources: &[
            res!("Andrew Ng Machine Learning (audit)", "https://www.coursera.org/specializations/machine-learning-introduction"),
            res!("fast.ai Practical Deep Learning", "https://course.fast.ai/"),
            res!("Kaggle Learn", "https://www.kaggle.com/learn"),
        ],
    },
    RoadmapEntry {
        skill: "postgresql",
        weeks: "2-3",
        priority: 60,
        resources: &[
            res!("PostgreSQL Tutorial", "https://www.postgresql.org/docs/current/tutorial.html"),
            res!("PostgreSQL Exercises", "https://pgexercises.com/"),
        ],
    },
    RoadmapEntry {
        skill: "data science",
        weeks: "6-8",
        priority: 58,
        resources: &[
            res!("Kaggle Learn", "https://www.kaggle.com/learn"),
            res!("freeCodeCamp Data Analysis with Python", "https://www.freecodecamp.org/learn/data-analysis-with-python/"),
            res!("pandas Getting Started", "https://pandas.pydata.org/docs/getting_started/index.html"),
        ],
    },
    RoadmapEntry {
        skill: "agile",
        weeks: "1-2",
        priority: 56,
        resources: &[
            res!("Atlassian Agile Coach", "https://www.atlassian.com/agile"),
            res!("Scrum Guide", "https://scrumguides.org/scrum-guide.html"),
        ],
    },
    RoadmapEntry {
        skill: "terraform",
        weeks: "2-4",
        priority: 55,
        resources: &[
            res!("HashiCorp Terraform Tutorials", "https://developer.hashicorp.com/terraform/tutorials"),
        ],
    },
    RoadmapEntry {
        skill: "go",
        weeks: "3-5",
        priority: 52,
        resources: &[
            res!("A Tour of Go", "https://go.dev/tour/"),
            res!("Go by Example", "https://gobyexample.com/"),
        ],
    },
    RoadmapEntry {
        skill: "graphql",
        weeks: "1-2",
        priority: 50,
        resources: &[
            res!("GraphQL Learn", "https://graphql.org/learn/"),
            res!("How to GraphQL", "https://www.howtographql.com/"),
        ],
    },
    RoadmapEntry {
        skill: "rust",
        weeks: "6-10",
        priority: 45,
        resources: &[
            res!("The Rust Book", "https://doc.rust-lang.org/book/"),
            res!("Rustlings", "https://github.com/rust-lang/rustlings"),
            res!("Rust by Example", "https://doc.rust-lang.org/rust-by-example/"),
        ],
    },
];

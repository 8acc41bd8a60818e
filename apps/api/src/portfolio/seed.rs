//! One-time demo seed: one fixed portfolio plus its experience history.
//! Idempotent per the existence check; safe to call repeatedly.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::experience::CreateExperience;
use crate::models::portfolio::{CreatePortfolio, PersonalInfo, Stat};
use crate::portfolio::repo::{create_portfolio, find_portfolio, resolve_portfolio};
use crate::sections::repo::create_experience;
use crate::state::AppState;

/// Business user id the seed data belongs to.
pub const SEED_USER_ID: &str = "akshaj";

/// POST /api/seed-data
pub async fn handle_seed(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if let Some(existing) = find_portfolio(&state.db, SEED_USER_ID).await? {
        return Ok(Json(json!({
            "message": "Data already exists",
            "portfolioId": existing.id
        })));
    }

    let portfolio = match create_portfolio(&state.db, &seed_portfolio()).await {
        Ok(row) => row,
        // Lost the unique race to a concurrent seed; report the winner's id.
        Err(AppError::Conflict(_)) => {
            let existing = resolve_portfolio(&state.db, SEED_USER_ID).await?;
            return Ok(Json(json!({
                "message": "Data already exists",
                "portfolioId": existing.id
            })));
        }
        Err(e) => return Err(e),
    };

    for experience in seed_experience() {
        create_experience(&state.db, portfolio.id, &experience).await?;
    }

    info!("Seeded portfolio {} for user {SEED_USER_ID}", portfolio.id);
    Ok(Json(json!({
        "message": "Database seeded successfully",
        "portfolioId": portfolio.id
    })))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seed_portfolio() -> CreatePortfolio {
    CreatePortfolio {
        user_id: SEED_USER_ID.into(),
        personal_info: PersonalInfo {
            name: "Akshaj Shivara Madhusudhan".into(),
            title: "Building Safer Systems at the Intersection of Cybersecurity & AI".into(),
            bio: "I'm a cybersecurity professional passionate about building safer digital \
                  ecosystems through the strategic integration of AI and traditional security \
                  practices."
                .into(),
            profile_image: None,
            location: "Buffalo, NY".into(),
            email: "akshaj@example.com".into(),
            linkedin: "https://linkedin.com/in/akshaj".into(),
            github: "https://github.com/akshaj".into(),
        },
        stats: vec![
            Stat {
                value: "3+".into(),
                label: "Years Experience".into(),
                order: 1,
            },
            Stat {
                value: "15+".into(),
                label: "Security Projects".into(),
                order: 2,
            },
            Stat {
                value: "8+".into(),
                label: "Certifications".into(),
                order: 3,
            },
            Stat {
                value: "2".into(),
                label: "Research Papers".into(),
                order: 4,
            },
        ],
    }
}

fn seed_experience() -> Vec<CreateExperience> {
    vec![
        CreateExperience {
            role: "Cybersecurity Intern".into(),
            company: "Catenactio Inc".into(),
            location: "Los Angeles, CA".into(),
            period: "May 2024 – Present".into(),
            start_date: None,
            end_date: None,
            current: true,
            highlights: strings(&[
                "Tuned SIEM rules (Wazuh) to reduce false positives and improve threat detection across enterprise clients",
                "Managed IAM (Okta) policies, automated provisioning/deprovisioning, and led user access reviews",
                "Applied system hardening and patch management practices on Linux endpoints",
                "Authored IR plans, playbooks, and security policy documents aligned with SOC 2, NIST 800-53, and CIS Controls",
                "Researched integration of AI models for alert triage, contributing to early-stage automation",
            ]),
            skills: strings(&[
                "SIEM",
                "Wazuh",
                "IAM",
                "Okta",
                "Linux Hardening",
                "Incident Response",
                "SOC 2",
                "NIST 800-53",
            ]),
            order: 1,
        },
        CreateExperience {
            role: "Research Assistant – AI Safety & Security".into(),
            company: "University at Buffalo".into(),
            location: "Buffalo, NY".into(),
            period: "Aug 2024 – Dec 2024".into(),
            start_date: None,
            end_date: None,
            current: false,
            highlights: strings(&[
                "Fine-tuned LLMs to detect adversarial prompts, hate speech, and toxic content",
                "Prompt-engineered secure inputs and outputs to reduce hallucinations",
                "Drafted internal guidelines for secure AI deployment and usage policies",
                "Contributed to cutting-edge research on adversarial machine learning",
            ]),
            skills: strings(&[
                "LLM Fine-tuning",
                "Prompt Engineering",
                "AI Safety",
                "Python",
                "Machine Learning",
            ]),
            order: 2,
        },
        CreateExperience {
            role: "Associate Software Engineer".into(),
            company: "Bosch Global Software Technologies".into(),
            location: "Bengaluru, IN".into(),
            period: "Jan 2023 – Jun 2023".into(),
            start_date: None,
            end_date: None,
            current: false,
            highlights: strings(&[
                "Developed and tested embedded automotive software in compliance with MISRA C standards",
                "Supported integration of functional safety protocols with vehicle cybersecurity measures",
                "Implemented secure coding practices for automotive control systems",
                "Collaborated on automotive cybersecurity frameworks and security validation processes",
            ]),
            skills: strings(&[
                "Embedded Systems",
                "MISRA C",
                "Automotive Security",
                "Functional Safety",
            ]),
            order: 3,
        },
    ]
}

//! First-start seeding: the administrator account and the default bilingual copy.

use super::Repository;
use crate::auth::hash_password;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    AboutSection, ContactForm, ContactSection, ContentSections, FooterSection, HeroSection,
    InitiativeCard, InitiativesSection, Language, NavLabels, UserRole,
};

/// Create the administrator account and any missing content document.
pub async fn seed_defaults(repo: &Repository, config: &Config) -> Result<(), AppError> {
    if repo
        .find_user_by_username(&config.admin_username)
        .await?
        .is_none()
    {
        let password_hash = hash_password(&config.admin_password, config.bcrypt_cost).await?;
        repo.create_user(&config.admin_username, &password_hash, UserRole::Admin)
            .await?;
        tracing::info!(username = %config.admin_username, "Default admin user created");
    }

    for language in Language::ALL {
        if repo
            .insert_content_if_absent(language, &default_content(language))
            .await?
        {
            tracing::info!(%language, "Default content created");
        }
    }

    Ok(())
}

/// The copy a fresh installation starts with.
pub fn default_content(language: Language) -> ContentSections {
    match language {
        Language::En => english(),
        Language::Fr => french(),
    }
}

fn s(text: &str) -> String {
    text.to_string()
}

fn card(title: &str, description: &str) -> InitiativeCard {
    InitiativeCard {
        title: s(title),
        description: s(description),
    }
}

fn english() -> ContentSections {
    ContentSections {
        nav: NavLabels {
            about: s("About Us"),
            initiatives: s("Initiatives"),
            contact: s("Contact"),
            donate: s("Donate Now"),
        },
        hero: HeroSection {
            title1: s("Empowering Futures,"),
            title2: s("Building Equity."),
            description: s("Amplify is dedicated to the cultural, educational, and economic advancement of Black communities through direct support and strategic partnerships."),
            learn_more: s("Learn More"),
            get_involved: s("Get Involved"),
        },
        about: AboutSection {
            title: s("Our Mission"),
            paragraph1: s("We believe in a world where every individual has the opportunity to thrive. Our organization was founded on the principles of equity, justice, and community. We work tirelessly to dismantle systemic barriers and create tangible pathways for success."),
            paragraph2: s("Through a combination of grassroots action, policy advocacy, and community-led programs, we are amplifying the voices that need to be heard and investing in the change-makers of tomorrow."),
        },
        initiatives: InitiativesSection {
            title: s("Current Initiatives"),
            subtitle: s("We focus our efforts on three core pillars to create lasting impact."),
            cards: vec![
                card(
                    "Youth & Education",
                    "Providing mentorship, scholarships, and STEM/arts programming to equip the next generation of leaders with the tools they need to succeed.",
                ),
                card(
                    "Economic Empowerment",
                    "Fostering Black-owned businesses through micro-grants, financial literacy workshops, and connecting entrepreneurs with vital resources.",
                ),
                card(
                    "Health & Wellness",
                    "Championing health equity by funding community clinics, mental health services, and wellness programs tailored to specific community needs.",
                ),
            ],
        },
        contact: ContactSection {
            title: s("Get in Touch"),
            description: s("We'd love to hear from you. Whether you're interested in volunteering, partnering, or simply want to learn more, reach out and a member of our team will get back to you."),
            address: s("123 Community Lane<br>Prosperity, USA 12345"),
            email: s("hello@amplify.org"),
            form: ContactForm {
                name: s("Full Name"),
                email: s("Email"),
                subject: s("Subject"),
                message: s("Message"),
                submit: s("Send Message"),
                success: s("Thank you! Your message has been sent. We'll be in touch soon."),
            },
        },
        footer: FooterSection {
            copyright: s("© 2025 Amplify. All rights reserved."),
        },
    }
}

fn french() -> ContentSections {
    ContentSections {
        nav: NavLabels {
            about: s("À Propos"),
            initiatives: s("Initiatives"),
            contact: s("Contact"),
            donate: s("Faire un Don"),
        },
        hero: HeroSection {
            title1: s("Autonomiser les Avenirs,"),
            title2: s("Bâtir l'Équité."),
            description: s("Amplify se consacre à l'avancement culturel, éducatif et économique des communautés noires par le soutien direct et des partenariats stratégiques."),
            learn_more: s("En Savoir Plus"),
            get_involved: s("S'Impliquer"),
        },
        about: AboutSection {
            title: s("Notre Mission"),
            paragraph1: s("Nous croyons en un monde où chaque individu a l'opportunité de prospérer. Notre organisation a été fondée sur les principes d'équité, de justice et de communauté. Nous travaillons sans relâche pour démanteler les barrières systémiques et créer des voies tangibles vers le succès."),
            paragraph2: s("Par une combinaison d'actions locales, de plaidoyer politique et de programmes communautaires, nous amplifions les voix qui doivent être entendues et investissons dans les acteurs du changement de demain."),
        },
        initiatives: InitiativesSection {
            title: s("Initiatives Actuelles"),
            subtitle: s("Nous concentrons nos efforts sur trois piliers fondamentaux pour créer un impact durable."),
            cards: vec![
                card(
                    "Jeunesse & Éducation",
                    "Offrir du mentorat, des bourses d'études et des programmes STEM/arts pour équiper la prochaine génération de leaders avec les outils nécessaires à leur réussite.",
                ),
                card(
                    "Autonomisation Économique",
                    "Favoriser les entreprises appartenant à des Noirs par des micro-subventions, des ateliers de littératie financière et en connectant les entrepreneurs avec des ressources vitales.",
                ),
                card(
                    "Santé & Bien-être",
                    "Promouvoir l'équité en santé en finançant des cliniques communautaires, des services de santé mentale et des programmes de bien-être adaptés aux besoins spécifiques de la communauté.",
                ),
            ],
        },
        contact: ContactSection {
            title: s("Contactez-Nous"),
            description: s("Nous aimerions avoir de vos nouvelles. Que vous soyez intéressé par le bénévolat, un partenariat ou simplement pour en savoir plus, contactez-nous et un membre de notre équipe vous répondra."),
            address: s("123 Rue Communauté<br>Prospérité, USA 12345"),
            email: s("hello@amplify.org"),
            form: ContactForm {
                name: s("Nom Complet"),
                email: s("Courriel"),
                subject: s("Sujet"),
                message: s("Message"),
                submit: s("Envoyer le Message"),
                success: s("Merci ! Votre message a été envoyé. Nous vous contacterons bientôt."),
            },
        },
        footer: FooterSection {
            copyright: s("© 2025 Amplify. Tous droits réservés."),
        },
    }
}

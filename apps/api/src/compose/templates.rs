// Fixed HTML templates for the generated documents.
// Placeholders are `{identifier}`; any other brace (CSS blocks) is emitted as-is.

use crate::compose::RenderError;

/// Single-pass placeholder substitution. Substituted values are never re-scanned,
/// so user text containing `{name}` stays literal. An unknown placeholder is an error.
pub fn render_template(template: &str, vars: &[(&str, String)]) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let ident_len = after
            .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
            .unwrap_or(after.len());

        if ident_len > 0 && after[ident_len..].starts_with('}') {
            let key = &after[..ident_len];
            let value = vars
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| RenderError::Template(format!("no value for placeholder '{key}'")))?;
            out.push_str(value);
            rest = &after[ident_len + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    Ok(out)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé
// ────────────────────────────────────────────────────────────────────────────

pub const RESUME_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>{name} - Résumé</title>
  <style>
    @page { size: Letter; margin: 0.55in 0.65in 0.5in 0.65in; }
    body { font-family: Helvetica, Arial, sans-serif; color: #1a1a2e; font-size: 9.5pt; line-height: 1.4; margin: 0; }
    h1 { font-size: 26pt; text-align: center; margin: 0 0 2pt; }
    .contact { text-align: center; color: #555555; font-size: 9pt; margin-bottom: 4pt; }
    hr { border: none; border-top: 1.5pt solid #e94560; margin: 0 0 6pt; }
    h2 { color: #e94560; font-size: 11pt; margin: 10pt 0 4pt; text-transform: uppercase; }
    .role { font-weight: bold; margin: 4pt 0 2pt; }
    .role-detail { color: #555555; font-size: 9pt; margin: 0 0 2pt 14pt; }
    p { margin: 0 0 3pt; }
  </style>
</head>
<body>
  <h1>{name}</h1>
  <div class="contact">{contact}</div>
  <hr />
  <h2>Professional Summary</h2>
  <p>{summary}</p>
{skills_section}
  <h2>Professional Experience</h2>
{experience}
{education_section}
</body>
</html>
"##;

// ────────────────────────────────────────────────────────────────────────────
// Portfolio
// ────────────────────────────────────────────────────────────────────────────

pub const PORTFOLIO_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{name} - Portfolio</title>
  <style>
    :root { --clr-bg: #0d0d1a; --clr-card: #16213e; --clr-accent: #e94560; --clr-text: #eaeaea; --clr-muted: #9a9ab0; }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    html { scroll-behavior: smooth; }
    body { font-family: Inter, system-ui, sans-serif; background: var(--clr-bg); color: var(--clr-text); line-height: 1.6; }
    nav { position: sticky; top: 0; background: rgba(13, 13, 26, 0.9); padding: 1rem 2rem; }
    .nav-inner { display: flex; justify-content: space-between; max-width: 1100px; margin: 0 auto; }
    .nav-logo { font-weight: 700; color: var(--clr-text); text-decoration: none; }
    .nav-links a { color: var(--clr-muted); margin-left: 1.5rem; text-decoration: none; }
    .hero { min-height: 70vh; display: flex; align-items: center; justify-content: center; text-align: center; padding: 4rem 2rem; }
    .hero h1 { font-size: 3rem; }
    .hero h1 span { color: var(--clr-accent); }
    .hero-subtitle { color: var(--clr-muted); margin: 1rem 0 2rem; }
    .btn { display: inline-block; padding: 0.8rem 2rem; border-radius: 999px; background: var(--clr-accent); color: #fff; text-decoration: none; }
    section { padding: 5rem 2rem; }
    .container { max-width: 1100px; margin: 0 auto; }
    .section-label { color: var(--clr-accent); text-transform: uppercase; letter-spacing: 0.1em; font-size: 0.8rem; }
    .section-title { font-size: 2rem; margin-bottom: 2rem; }
    .about-grid { display: grid; grid-template-columns: 2fr 1fr; gap: 3rem; }
    .about-stats { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
    .stat-card { background: var(--clr-card); border-radius: 12px; padding: 1.5rem; text-align: center; }
    .stat-card .num { font-size: 2rem; font-weight: 700; color: var(--clr-accent); }
    .stat-card .label { color: var(--clr-muted); }
    .skills-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 1rem; }
    .skill-card { background: var(--clr-card); border-radius: 12px; padding: 1rem; display: flex; align-items: center; gap: 0.75rem; }
    .skill-icon { width: 2rem; height: 2rem; border-radius: 8px; background: var(--clr-accent); display: flex; align-items: center; justify-content: center; font-weight: 700; }
    .timeline-item { border-left: 2px solid var(--clr-accent); padding: 0 0 2rem 1.5rem; }
    .timeline-content h3 { margin-bottom: 0.25rem; }
    .timeline-content p { color: var(--clr-muted); }
    .edu-list { list-style: none; }
    .edu-list li { background: var(--clr-card); border-radius: 12px; padding: 1rem 1.5rem; margin-bottom: 0.75rem; }
    #contact { text-align: center; }
    .contact-info { margin-top: 2rem; display: flex; gap: 2rem; justify-content: center; flex-wrap: wrap; }
    footer { text-align: center; padding: 2rem; color: var(--clr-muted); font-size: 0.85rem; }
    @media (max-width: 720px) { .about-grid { grid-template-columns: 1fr; } .nav-links { display: none; } }
  </style>
</head>
<body>

<nav>
  <div class="nav-inner">
    <a href="#" class="nav-logo">{name}</a>
    <div class="nav-links">
      <a href="#about">About</a>
      <a href="#skills">Skills</a>
      <a href="#experience">Experience</a>
      <a href="#contact">Contact</a>
    </div>
  </div>
</nav>

<section class="hero">
  <div>
    <h1>Hi, I'm <span>{name}</span></h1>
    <p class="hero-subtitle">A passionate professional crafting innovative solutions and delivering exceptional results.</p>
    <a href="#contact" class="btn">Get In Touch</a>
  </div>
</section>

<section id="about">
  <div class="container about-grid">
    <div>
      <p class="section-label">About Me</p>
      <h2 class="section-title">Building things that matter.</h2>
      <p>{about}</p>
    </div>
    <div class="about-stats">
      <div class="stat-card"><div class="num">{skill_count}</div><div class="label">Skills</div></div>
      <div class="stat-card"><div class="num">{role_count}</div><div class="label">Roles</div></div>
      <div class="stat-card"><div class="num">{education_count}</div><div class="label">Education</div></div>
      <div class="stat-card"><div class="num">&infin;</div><div class="label">Curiosity</div></div>
    </div>
  </div>
</section>

<section id="skills">
  <div class="container">
    <p class="section-label">Expertise</p>
    <h2 class="section-title">Skills &amp; Tools</h2>
    <div class="skills-grid">
{skill_cards}
    </div>
  </div>
</section>

<section id="experience">
  <div class="container">
    <p class="section-label">Career</p>
    <h2 class="section-title">Experience</h2>
    <div class="timeline">
{timeline}
    </div>
  </div>
</section>

<section id="education">
  <div class="container">
    <p class="section-label">Learning</p>
    <h2 class="section-title">Education</h2>
    <ul class="edu-list">
{education_items}
    </ul>
  </div>
</section>

<section id="contact">
  <div class="container">
    <p class="section-label">Let's connect</p>
    <h2 class="section-title">Get In Touch</h2>
    <p style="color: var(--clr-muted); max-width: 480px; margin: 0 auto;">Interested in working together or just want to say hi? I'd love to hear from you.</p>
    <div class="contact-info">
{contact_items}
    </div>
  </div>
</section>

<footer>
  <p>&copy; {year} {name}. Portfolio generated by CareerBoost.</p>
</footer>

</body>
</html>
"##;

pub const PORTFOLIO_README_TEMPLATE: &str = r#"# {name} - Portfolio

Generated by CareerBoost on {date}.

Open `index.html` in a browser to preview it. The page is a single static file with no build step.

## Deploy (all free)

1. **GitHub Pages**: push `index.html` to a repository and enable Pages.
2. **Netlify**: drag and drop this folder onto app.netlify.com/drop.
3. **Vercel**: import the GitHub repository.
4. **Cloudflare Pages**: upload the folder for an instant global CDN.
"#;

// Prompt constants for resume enhancement.

/// Rewrite prompt template. Replace `{jd_text}` and `{resume_text}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer optimizing a resume for Applicant Tracking Systems.
Rewrite the resume below so it matches the job description as closely as the candidate's real experience allows.

=== JOB DESCRIPTION ===
{jd_text}

=== CURRENT RESUME ===
{resume_text}

=== INSTRUCTIONS ===
1. Summary: open with a headline that mirrors the job title; 3-4 sentences using the JD's own terminology.
2. Skills: group into Technical Skills, Core Competencies and Tools & Technologies. Include every JD skill the candidate can reasonably claim, with common variants (e.g. "React.js" and "ReactJS") and both acronyms and full forms.
3. Experience: rewrite every bullet to start with a strong action verb, use JD keywords in context and quantify impact. Add 2-3 bullets per role that align with JD requirements and follow from existing experience.
4. Education and certifications: emphasise anything the JD asks for.
5. Formatting: standard section headers (PROFESSIONAL SUMMARY, TECHNICAL SKILLS, PROFESSIONAL EXPERIENCE, EDUCATION), simple bullets, MM/YYYY dates, no tables or columns.

Do NOT invent employers, roles, degrees or certifications. Do NOT add skills from unrelated domains.
The result should be noticeably longer and more detailed than the original (roughly 600-900 words).

Start immediately with the candidate's name. No preamble, no explanations, no code fences."#;

pub fn build_rewrite_prompt(resume_text: &str, jd_text: &str) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{jd_text}", jd_text)
        .replace("{resume_text}", resume_text)
}

//! Prompt template for resume tailoring
//!
//! The output format is enforced by the response schema, so the template
//! does not ask for JSON explicitly.

use crate::request::GenerationRequest;

/// Assemble the prompt for a request. Inputs are substituted verbatim.
pub fn build_prompt(request: &GenerationRequest) -> String {
    render(
        &request.resume_text,
        &request.job_title,
        &request.job_description,
    )
}

fn render(resume: &str, job_title: &str, job_description: &str) -> String {
    format!(
        r#"
You are an expert ATS (Applicant Tracking System) specialist and professional resume writer.
Your task is to rewrite the candidate's resume based on the TARGET JOB DESCRIPTION to maximize the ATS match score and appeal to human recruiters.

--- CANDIDATE'S CURRENT RESUME TEXT ---
{resume}

--- TARGET JOB TITLE ---
{job_title}

--- TARGET JOB DESCRIPTION ---
{job_description}

--- OUTPUT REQUIREMENTS ---
1.  **TAILORED_RESUME (Full Text):** Provide the complete, revised resume text.
    * **Heading Consistency:** MUST use the candidate's existing section headers EXACTLY as they appear (e.g., "Career Objective:", "TECHNICAL SKILLS:", "PROFESSIONAL EXPERIENCE:", "EDUCATION:").
    * **Summary Focus:** Rewrite any objective or summary to be a sharp, targeted professional summary (max 4-5 lines).
    * **Keyword Optimization:** Integrate critical hard and soft skills from the job description directly into the summary and experience bullet points.
    * **Impact and Action:** Every bullet point in the "PROFESSIONAL EXPERIENCE" section MUST start with a strong action verb (e.g., Led, Developed, Optimized, Reduced). Avoid vague phrases (e.g., "Responsible for," "Worked on").
    * **Quantifiable Results:** Focus on measurable outcomes (e.g., "Reduced latency by 40%", "Managed 10 TB data").
    * **Formatting:** All experience bullet points MUST start with the **middle-dot bullet character (•)**, followed by a space. Do not use dashes (-) or asterisks (*).
    * **Final Structure:** The resume must be clean text, ready to be copied into a document.

2.  **ATS_MATCH_SCORE (Integer):** Provide a numerical match percentage (0-100).

3.  **SCORE_REASONING (String):** Give a brief, professional explanation (2-3 sentences) for the score.
"#
    )
}

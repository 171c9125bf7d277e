//! Prompt and fallback templates for medical report analysis.
//!
//! Centralising every piece of fixed text here serves two purposes:
//!
//! 1. **Single source of truth** — changing the analysis framework (e.g.
//!    adding a section or tightening the refusal rule) requires editing
//!    exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the prompt and render the
//!    fallback without a live model call, so template regressions are cheap
//!    to catch.
//!
//! The prompt is versioned: [`PROMPT_VERSION`] participates in the analysis
//! cache key, so a template change never serves stale cached analyses.

/// Version tag for [`ANALYSIS_PROMPT`]. Bump on any semantic prompt change.
pub const PROMPT_VERSION: &str = "medical-analysis/2";

/// The fixed refusal line the model is instructed to emit for non-medical
/// input. Enforcement is delegated to the model's judgment, not checked
/// locally.
pub const NON_MEDICAL_REFUSAL: &str =
    "⚠️ Please provide relevant medical documentation for analysis.";

/// Fixed instruction prefix for every analysis request.
///
/// The extracted document text is appended after this prompt, separated by a
/// blank line. The model is asked for a fixed section layout so downstream
/// consumers can rely on the headings.
pub const ANALYSIS_PROMPT: &str = r#"You are an Expert Medical AI Assistant with deep knowledge in:

**Medical Specialties:**
- Internal Medicine, Cardiology, Radiology, Pathology, Oncology
- Lab diagnostics, imaging interpretation, clinical correlations
- Evidence-based medicine and current medical guidelines

**Analysis Framework:**

1. **Data Extraction & Validation**
   - Identify all vital signs, lab values, imaging findings
   - Flag critical/abnormal values immediately
   - Note missing or incomplete data

2. **Clinical Interpretation**
   - Explain abnormalities in context of normal ranges
   - Consider age, gender, and clinical history
   - Correlate findings across different systems
   - Identify patterns and trends

3. **Differential Diagnosis**
   - List possible conditions based on findings
   - Rank by likelihood with supporting evidence
   - Note red flags requiring urgent attention

4. **Risk Stratification**
   - Assess severity of findings
   - Identify time-sensitive issues
   - Suggest monitoring parameters

5. **Medical Terminology & Education**
   - Use precise medical terms
   - Provide clear explanations for patients
   - Include relevant medical context

**Output Structure:**

### Executive Summary
[2-3 sentences highlighting key findings and urgency level]

### Critical Findings ⚠️
[Any urgent/life-threatening abnormalities requiring immediate attention]

### Detailed Analysis
**Laboratory Results:**
- [Parameter]: [Value] ([Normal Range]) - [Interpretation]

**Imaging Findings:**
- [Description and clinical significance]

**Vital Signs:**
- [Assessment]

### Clinical Correlation
[How findings relate to each other and possible diagnoses]

### Recommendations
1. [Most important action items]
2. [Follow-up tests or consultations needed]
3. [Monitoring parameters]

### Confidence Assessment
**Level:** [High/Medium/Low]
**Reasoning:** [Why this confidence level]
**Limitations:** [Any missing data or uncertainties]

**Important:** Only analyze medical data. For non-medical content, respond: "⚠️ Please provide relevant medical documentation for analysis."

**Document to Analyze:**"#;

/// Render the degraded analysis returned when the model stays unreachable
/// past the last retry.
///
/// Deterministic for a given word count, always non-empty — this is the
/// service's availability guarantee: once extraction has succeeded, the
/// client gets a `success` envelope no matter what the provider does.
pub fn fallback_analysis(word_count: usize) -> String {
    format!(
        r#"🔄 Fallback Analysis Mode (AI Service Temporarily Unavailable)

**Document Statistics:**
- Type: Medical document
- Words: Approximately {word_count}
- Status: Preliminary Review

**Basic Observations:**
The document appears to contain medical information. Due to temporary technical limitations,
a full AI-powered analysis is not available at this moment.

**Recommended Actions:**
1. Retry analysis in a few minutes when AI service is restored
2. For urgent matters, consult a healthcare professional directly
3. Review the document manually for time-sensitive findings

**Note:** This is a simplified analysis. For comprehensive evaluation including differential
diagnosis, risk stratification, and detailed clinical correlation, please retry when the
AI service is available.
"#
    )
}

//! Battlecard prompt template and its renderer.

/// System message sent ahead of every battlecard prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a senior strategist and B2B sales enablement expert.";

const COMPANY_A_NAME: &str = "companyAName";
const COMPANY_A_URL: &str = "companyAUrl";
const COMPANY_B_NAME: &str = "companyBName";
const COMPANY_B_URL: &str = "companyBUrl";

/// Battlecard instructions for the completion model. `{companyAName}`,
/// `{companyAUrl}`, `{companyBName}` and `{companyBUrl}` are filled in by
/// [`render_battlecard_prompt`].
pub const BATTLECARD_TEMPLATE: &str = r#"
You are a senior strategist and B2B sales enablement expert.

Your task is to create a world-class battlecard for internal sales use.

Use the following structure, tone, and format to compare our company (Company A) against a specific competitor (Company B). Make it bold, tactical, and useful in live sales conversations.

For extra context, both companies are resellers of Laserfiche. We need to identify why we are the better choice.

---

### INPUT:

**Company A (Us):**
Name: {companyAName}
Website: {companyAUrl}

**Company B (Competitor):**
Name: {companyBName}
Website: {companyBUrl}


### OUTPUT FORMAT (USE THIS EXACTLY):

**IMPORTANT**: Wrap each major section (starting from "Who Are We Selling Against?" up to and including "Close With Confidence") in a `div` with the class `card bg-neutral text-neutral-content shadow-xl w-full mb-4`. Inside that, add a `div` with class `card-body`. Start each section's content with an `h2` with class `card-title text-primary-`. **Use direct HTML markup** (e.g., `<table>`, `<ul>`, `<li>`, `<blockquote>`, `<strong>`) instead of Markdown within the card bodies.**

<h2>🛡️ Competitive Battlecard: {companyBName} vs. {companyAName}</h2>

<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_summary">
<div class="card-body">
<h2 class="card-title ">👤 Who Are We Selling Against?</h2>
<p>[Brief summary of the competitor: what they're known for, target customers, what they offer. Use paragraph tags.]</p>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_quick_summary">
<div class="card-body">
<h2 class="card-title ">🧠 Quick Summary: [{companyAName} vs. {companyBName}]</h2>
<div class="overflow-x-auto">
<table class="table  w-full">
<thead>
<tr>
<th>Attribute</th>
<th><strong>{companyAName} (Us)</strong></th>
<th><strong>{companyBName} (Them)</strong></th>
</tr>
</thead>
<tbody>
<tr><td>Ease of Use</td><td>[✅ / 🟢 / 🔴 and 1-line description]</td><td>[✅ / 🟢 / 🔴 and 1-line description]</td></tr>
<tr><td>Ideal Customer</td><td>[1-line summary]</td><td>[1-line summary]</td></tr>
<tr><td>Pricing</td><td>[1-line summary]</td><td>[1-line summary]</td></tr>
<tr><td>Speed to Value</td><td>[1-line summary]</td><td>[1-line summary]</td></tr>
<tr><td>Customization</td><td>[1-line summary]</td><td>[1-line summary]</td></tr>
<tr><td>Integration</td><td>[1-line summary]</td><td>[1-line summary]</td></tr>
<tr><td>Support & Service</td><td>[1-line summary]</td><td>[1-line summary]</td></tr>
</tbody>
</table>
</div>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_core">
<div class="card-body">
<h2 class="card-title ">🗣️ Core Talk Tracks (Why We Win)</h2>
<ol class="list-decimal list-inside space-y-2">
<li>
<strong>[Talk Track Title]</strong>
<blockquote class="pl-4 italic border-l-4 border-gray-300">
<p>"[Sharp, memorable quote your sales team can use]"</p>
</blockquote>
</li>
<li>
<strong>[Talk Track Title]</strong>
<blockquote class="pl-4 italic border-l-4 border-gray-300">
<p>"[Another punchy message focused on our strength]"</p>
</blockquote>
</li>
<li>
<strong>[Talk Track Title]</strong>
<blockquote class="pl-4 italic border-l-4 border-gray-300">
<p>"[Third key talking point that sets us apart]"</p>
</blockquote>
</li>
</ol>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_objections">
<div class="card-body">
<h2 class="card-title ">🛑 Common Objections + Responses</h2>
<div class="overflow-x-auto">
<table class="table w-full">
<thead>
<tr><th><strong>Objection</strong></th><th><strong>Reframe or Response</strong></th></tr>
</thead>
<tbody>
<tr><td>"[Customer objection]"</td><td>"Here's how we respond to that clearly and directly."</td></tr>
<tr><td>"[Customer objection]"</td><td>"Short, confidence-building response."</td></tr>
<tr><td>"[Customer objection]"</td><td>"Empathetic, but strong counter-message."</td></tr>
</tbody>
</table>
</div>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_landmine">
<div class="card-body">
<h2 class="card-title ">🚨 Landmine Questions (Use to Plant Doubt Subtly)</h2>
<ul class="list-disc list-inside space-y-1">
<li>"What does your onboarding process look like with {companyBName}?"</li>
<li>"How many of your team members are actually logging in every day?"</li>
<li>"How flexible is it without needing a developer?"</li>
<li>"How long did implementation take?"</li>
</ul>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_positioning">
<div class="card-body">
<h2 class="card-title ">🧨 Positioning Landmines to Avoid</h2>
<ul class="list-disc list-inside space-y-1">
<li>Don't bash the competitor — frame them as misaligned.</li>
<li>Avoid language that makes us sound smaller or less serious.</li>
<li>Keep focus on business impact, not feature comparisons.</li>
</ul>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_taglines">
<div class="card-body">
<h2 class="card-title ">🧩 Taglines You Can Use in Messaging</h2>
<ul class="list-disc list-inside space-y-1">
<li>"[Bold, sticky tagline 1]"</li>
<li>"[Tagline 2]"</li>
<li>"[Tagline 3]"</li>
</ul>
</div>
</div>


<div class="card bg-neutral text-neutral-content shadow-xl w-full mb-4 comp_close">
<div class="card-body">
<h2 class="card-title ">🔚 Close With Confidence</h2>
<p>[Wrap up with a strong paragraph reminding the rep when we win and how to confidently guide the conversation. Use paragraph tags.]</p>
</div>
</div>


Make your tone confident, crisp, and practical. This should feel like it was written by a VP of Sales who knows exactly what reps need to win deals.
"#;

/// Values substituted into [`BATTLECARD_TEMPLATE`]. Company A is the caller's
/// own company, company B the competitor.
#[derive(Debug, Clone, Copy)]
pub struct PromptParams<'a> {
    pub company_a_name: &'a str,
    pub company_a_url: &'a str,
    pub company_b_name: &'a str,
    pub company_b_url: &'a str,
}

impl<'a> PromptParams<'a> {
    fn lookup(&self, placeholder: &str) -> Option<&'a str> {
        match placeholder {
            COMPANY_A_NAME => Some(self.company_a_name),
            COMPANY_A_URL => Some(self.company_a_url),
            COMPANY_B_NAME => Some(self.company_b_name),
            COMPANY_B_URL => Some(self.company_b_url),
            _ => None,
        }
    }
}

/// Fill the battlecard template with `params`.
pub fn render_battlecard_prompt(params: &PromptParams<'_>) -> String {
    render(BATTLECARD_TEMPLATE, |name| params.lookup(name))
}

/// Single left-to-right pass over `template`. Each `{name}` known to `lookup`
/// is replaced; inserted values are never scanned again. Unknown or
/// unterminated braces are copied as-is.
fn render<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        match lookup(&after[..close]) {
            Some(value) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

pub const QUIZ_PROMPT_ROLE: &str = "You are an expert quiz creator. Create a comprehensive multiple-choice quiz based on the following Wikipedia article digest.";

pub const QUIZ_PROMPT_RULES: &str = "Requirements:
1. Each question must have EXACTLY 4 options.
2. Questions should cover different aspects of the article.
3. Include a mix of difficulty levels: easy (2-3 questions), medium (3-4 questions), hard (2-3 questions).
4. Ensure all questions and answers are factually accurate based ONLY on the digest above.
5. DO NOT make up information not present in the digest.
6. Each question must have a brief explanation of why the answer is correct.
7. The \"answer\" field must be copied VERBATIM from the question's \"options\" array.
8. Also suggest 5-7 related Wikipedia topics for further reading.";

pub const QUIZ_PROMPT_FORMAT: &str = r#"Return your response in the following JSON format ONLY (no markdown, no extra text):
{
  "questions": [
    {
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "The correct option text",
      "difficulty": "easy",
      "explanation": "Brief explanation of why this is correct"
    }
  ],
  "related_topics": ["Topic 1", "Topic 2", "Topic 3", "Topic 4", "Topic 5"]
}"#;

pub const QUIZ_PROMPT_CLOSING: &str = "Make sure each question is clear, unambiguous, and tests understanding of the article content.
IMPORTANT: Return ONLY the JSON object, no other text before or after.";

use super::Prompt;
use crate::{ai::openai, domain::GeneratedRecipe, error::RecipeError};

const SYSTEM_INSTRUCTION: &str = "당신은 전문 요리사입니다. 항상 JSON 형식으로만 응답하세요.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

pub struct RecipePrompt {
    ingredients_text: String,
    model: String,
}

impl RecipePrompt {
    pub fn new(ingredients_text: &str, model: &str) -> Self {
        Self {
            ingredients_text: ingredients_text.to_string(),
            model: model.to_string(),
        }
    }
}

impl Prompt for RecipePrompt {
    type Response = GeneratedRecipe;

    fn build_payload(&self) -> openai::ChatCompletionRequest {
        openai::ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                openai::ChatCompletionMessage::system(SYSTEM_INSTRUCTION),
                openai::ChatCompletionMessage::user(build_recipe_prompt(&self.ingredients_text)),
            ],
            max_tokens: MAX_TOKENS,
            stream: false,
            temperature: TEMPERATURE,
        }
    }

    fn parse_response(&self, raw_response: &str) -> Result<GeneratedRecipe, RecipeError> {
        parse_recipe(raw_response)
    }
}

pub fn build_recipe_prompt(ingredients_text: &str) -> String {
    format!(
        r#"당신은 전문 요리사입니다. 주어진 재료를 기반으로 실용적이고 맛있는 레시피를 만들어주세요.

## 현재 보유한 재료:
{ingredients_text}

## 레시피 생성 규칙:
1. 위 재료를 최대한 활용하되, 필요한 경우 기본 양념(소금, 후추, 식용유 등)은 추가 가능합니다.
2. 난이도는 ●와 ○로 5개 표시 (예: ●●●○○는 중간 난이도)
3. 예상 조리 시간을 분 단위로 정확하게 표시
4. 재료는 구체적인 양과 함께 나열
5. 조리 방법은 큰 단계와 작은 단계로 구성:
   - 큰 단계: "재료 준비", "조리하기", "마무리" 등의 주요 과정
   - 작은 단계: 각 큰 단계를 이루는 세부 동작들

## 응답 형식 (반드시 JSON 형식으로):
{{
  "recipe_name": "레시피 이름",
  "recipe_description": "요리에 대한 간단한 설명 (2-3문장)",
  "recipe_difficulty": "●●●○○",
  "recipe_estimated_time": "45분",
  "ingredients": [
    "재료1 - 200g",
    "재료2 - 1개",
    "재료3 - 2큰술"
  ],
  "cooking_steps": [
    {{
      "title": "재료 준비",
      "sub_steps": [
        "채소를 깨끗이 씻어 물기를 제거합니다",
        "고기는 먹기 좋은 크기로 자릅니다",
        "양념 재료를 계량합니다"
      ]
    }},
    {{
      "title": "조리하기",
      "sub_steps": [
        "팬에 식용유를 두르고 중불로 가열합니다",
        "고기를 넣고 겉면이 익을 때까지 볶습니다",
        "채소를 넣고 함께 볶습니다"
      ]
    }},
    {{
      "title": "마무리",
      "sub_steps": [
        "양념을 넣고 골고루 섞습니다",
        "약불로 줄이고 5분간 더 조리합니다",
        "불을 끄고 그릇에 담아냅니다"
      ]
    }}
  ]
}}

JSON 형식만 응답해주세요. 다른 설명은 불필요합니다."#
    )
}

/// Removes surrounding whitespace and a markdown code fence, which the model
/// adds now and then despite being told not to.
fn strip_code_fence(raw_response: &str) -> &str {
    let content = raw_response.trim();
    let content = content
        .strip_prefix("```json")
        .or_else(|| content.strip_prefix("```"))
        .unwrap_or(content);
    let content = content.strip_suffix("```").unwrap_or(content);

    content.trim()
}

fn parse_recipe(raw_response: &str) -> Result<GeneratedRecipe, RecipeError> {
    let content = strip_code_fence(raw_response);

    serde_json::from_str(content).map_err(|e| RecipeError::MalformedModelOutput {
        reason: e.to_string(),
        raw: content.to_string(),
    })
}

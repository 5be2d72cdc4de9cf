//! Prompt 组装 - 业务能力层
//!
//! 把六个请求参数代入固定模板，生成交给下游模型的完整指令。
//! 模板本身约定了输出的小节顺序、编号样式、行内公式定界符与答案/解析格式，
//! 与既有 prompt 保持逐字兼容。纯字符串构造，无副作用。

use crate::error::AppResult;
use crate::model::ExamRequest;

/// 固定的系统消息
pub const SYSTEM_PROMPT: &str = "你是一位资深的初中教师，擅长根据教材内容出题。";

/// 组装完整的出题 prompt
///
/// 先执行预检校验（课文非空、题量非零），失败时不产生任何输出。
pub fn compose(request: &ExamRequest) -> AppResult<String> {
    request.validate()?;

    let prompt = format!(
        r#"你是一位资深的初中教师。请根据以下教材内容或知识点，生成一套标准化的练习题。

学科：{subject}
难度：{difficulty}

题量要求：
- 单选题：{single_choice} 题
- 填空题：{fill_blank} 题
- 简答题：{short_answer} 题

创意度：{creativity}（0.0 为保守模式，1.0 为创意模式）

教材内容/知识点：
{source_text}

输出格式要求（严格遵守）：

1. 整体结构：
   - 第一行：## 一、选择题
   - 第二行：## 二、填空题
   - 第三行：## 三、简答题
   - 第四行：## 参考答案

2. 题目编号格式：
   - 使用"1."、"2."、"3."的格式
   - 每道题之间空一行

3. 选项格式：
   - 使用"A."、"B."、"C."、"D."的格式
   - 选项字母后加空格，然后是选项内容
   - 每个选项独占一行

4. 数学公式格式：
   - 所有数学符号、公式必须使用 LaTeX 格式
   - 必须包裹在单美元符号 $ 中（例如 $x^2$）
   - 不要使用 \[ \] 块级公式，全部使用行内公式

5. 题目内容要求：
   - 题目简洁明了，符合初中生认知水平
   - 避免使用过于复杂的表述
   - 确保题目与教材内容紧密相关

6. 参考答案格式：
   - 使用"1. xxx"的格式
   - 答案准确简洁
   - 每题答案独占一行
   - 每题答案后必须提供详细的解析
   - 解析格式：在答案后另起一行，使用"解析："开头
   - 解析要详细说明解题思路和步骤

示例格式：
## 一、选择题
1. 已知关于 $x$ 的一元二次方程 $x^2 - 2kx + k^2 - 1 = 0$ 有两个不相等的实数根，则实数 $k$ 的取值范围是（ ）
A. $k > -1$
B. $k \ge 0$
C. $k > 0$
D. $k > 1$

2. ...

## 二、填空题
1. 若 $a > 0$，则 $a$ 的相反数是______。

2. ...

## 三、简答题
1. 请简述一元二次方程的求根公式。

2. ...

## 参考答案
1. D
解析：一元二次方程有两个不相等的实数根，判别式 $\Delta > 0$，即 $(-2k)^2 - 4 \times 1 \times (k^2 - 1) > 0$，化简得 $4k^2 - 4k^2 + 4 > 0$，即 $4 > 0$，恒成立。但题目要求有两个不相等的实数根，所以 $k^2 - 1 \ne 0$，即 $k \ne \pm 1$。又因为 $k^2 - 1 = 0$ 时方程有一个实数根，所以 $k^2 - 1 > 0$，即 $k > 1$ 或 $k < -1$。结合选项，选 D。

2. ...

请严格按照以上格式生成练习题："#,
        subject = request.subject,
        difficulty = request.difficulty,
        single_choice = request.counts.single_choice,
        fill_blank = request.counts.fill_blank,
        short_answer = request.counts.short_answer,
        creativity = request.creativity,
        source_text = request.source_text,
    );

    Ok(prompt)
}

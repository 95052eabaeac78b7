use rand::{Rng, RngCore};

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, ELF_CHARACTER_TABLE, ELF_GLYPH_TABLE, ELF_SPRITE_SCRATCH,
    FLAG_REGISTER, SPRITE_HEIGHT, SPRITE_SHEET_START, STACK_DEPTH,
};
use crate::error::{Chip8Error, Result};
use crate::state::State;

/// pc += 2, or pc += 4 if `condition`
fn skip_if(condition: bool, state: &State) -> State {
    let pc = if condition {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// Vx = value; VF = flag
///
/// The flag is written last so it wins when x is F.
fn set_with_flag(x: u8, value: u8, flag: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = value;
    v[FLAG_REGISTER] = flag;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// clear
pub fn clr(state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop() + 2
pub fn rts(state: &State) -> Result<State> {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow { pc: state.pc });
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize] + 0x2,
        sp,
        ..*state
    })
}

/// PC = addr
pub fn jump(addr: u16, state: &State) -> State {
    State { pc: addr, ..*state }
}

/// STACK.push(PC); PC = addr
pub fn call(addr: u16, state: &State) -> Result<State> {
    if state.sp as usize >= STACK_DEPTH {
        return Err(Chip8Error::StackOverflow { pc: state.pc });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: addr,
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(x: u8, kk: u8, state: &State) -> State {
    skip_if(state.v[x as usize] == kk, state)
}

/// if Vx != kk then pc += 2
pub fn skne(x: u8, kk: u8, state: &State) -> State {
    skip_if(state.v[x as usize] != kk, state)
}

/// if Vx == Vy then pc += 2
pub fn skre(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] == state.v[y as usize], state)
}

/// if Vx > Vy then pc += 2
pub fn skgt(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] > state.v[y as usize], state)
}

/// if Vx < Vy then pc += 2
pub fn sklt(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] < state.v[y as usize], state)
}

/// if Vx != Vy then pc += 2
pub fn skrne(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] != state.v[y as usize], state)
}

/// Vx = kk
pub fn load(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx = Vy
pub fn mv(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += Vy; VF = carry
pub fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    set_with_flag(x, res, u8::from(carry), state)
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(x: u8, y: u8, state: &State) -> State {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    set_with_flag(x, vx.wrapping_sub(vy), u8::from(vx > vy), state)
}

/// Vx >>= 1; VF = old lsb
pub fn shr(x: u8, state: &State) -> State {
    let vx = state.v[x as usize];
    set_with_flag(x, vx >> 1, vx & 0x1, state)
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(x: u8, y: u8, state: &State) -> State {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    set_with_flag(x, vy.wrapping_sub(vx), u8::from(vy > vx), state)
}

/// Vx <<= 1; VF = old msb
///
/// The msb is stored masked in place (0x80 or 0x00) unless `normalized`, which stores 1 or 0.
pub fn shl(x: u8, normalized: bool, state: &State) -> State {
    let vx = state.v[x as usize];
    let msb = vx & 0x80;
    let flag = if normalized { msb >> 7 } else { msb };
    set_with_flag(x, vx << 1, flag, state)
}

/// VF:Vx = Vx * Vy
pub fn mul(x: u8, y: u8, state: &State) -> State {
    let product = u16::from(state.v[x as usize]) * u16::from(state.v[y as usize]);
    set_with_flag(x, (product & 0xFF) as u8, (product >> 8) as u8, state)
}

/// Vx = Vx / Vy; VF = Vx % Vy
pub fn div(x: u8, y: u8, state: &State) -> Result<State> {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    if vy == 0 {
        return Err(Chip8Error::DivideByZero {
            opcode: 0x9002 | u16::from(x) << 8 | u16::from(y) << 4,
        });
    }
    Ok(set_with_flag(x, vx / vy, vx % vy, state))
}

/// mem[I..I+5] = bcd(Vx:Vy)
/// Store the 5 digit BCD repr of the word Vx:Vy starting at address i
pub fn bcd16(x: u8, y: u8, state: &State) -> Result<State> {
    let word = u16::from(state.v[x as usize]) << 8 | u16::from(state.v[y as usize]);
    let digits = [
        (word / 10000) as u8,
        (word / 1000 % 10) as u8,
        (word / 100 % 10) as u8,
        (word / 10 % 10) as u8,
        (word % 10) as u8,
    ];
    let mut next = *state;
    next.write(state.i as usize, digits.len())?
        .copy_from_slice(&digits);
    next.pc += 0x2;
    Ok(next)
}

/// I = addr
pub fn loadi(addr: u16, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: addr,
        ..*state
    }
}

/// PC = V0 + addr
pub fn jumpi(addr: u16, state: &State) -> State {
    State {
        pc: u16::from(state.v[0x0]) + addr,
        ..*state
    }
}

/// Vx = rand_byte & kk
/// The random byte is drawn from 0..255, never 255 itself.
pub fn rand(x: u8, kk: u8, state: &State, rng: &mut dyn RngCore) -> State {
    let rand_byte: u8 = rng.gen_range(0..255);
    let mut v = state.v;
    v[x as usize] = rand_byte & kk;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels would be erased
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> Result<State> {
    let sprite = state.read(state.i as usize, n as usize)?;
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;

    let mut frame_buffer = state.frame_buffer;
    let mut collision = 0x0;

    for (row, byte) in sprite.iter().enumerate() {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (byte >> (7 - bit)) & 1;
            collision |= pixel_value & frame_buffer[y][x];
            frame_buffer[y][x] ^= pixel_value;
        }
    }

    let mut v = state.v;
    v[FLAG_REGISTER] = collision;

    Ok(State {
        pc: state.pc + 0x2,
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
pub fn skpr(x: u8, state: &State) -> State {
    skip_if(state.is_pressed(state.v[x as usize]), state)
}

/// if !Vx.pressed then pc += 2
pub fn skup(x: u8, state: &State) -> State {
    skip_if(!state.is_pressed(state.v[x as usize]), state)
}

/// Vx = DT
pub fn moved(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// await keypress for Vx
/// Without a pressed key the pc stays put so this runs again next cycle.
pub fn keyd(x: u8, state: &State) -> State {
    match state.first_pressed_key() {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key;
            State {
                pc: state.pc + 0x2,
                v,
                register_needing_key: None,
                ..*state
            }
        }
        None => State {
            register_needing_key: Some(x),
            ..*state
        },
    }
}

/// DT = Vx
pub fn loads(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn ld(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx; VF = I + Vx > 0xFFF
pub fn addi(x: u8, state: &State) -> State {
    let vx = u16::from(state.v[x as usize]);
    let mut v = state.v;
    v[FLAG_REGISTER] = u8::from(u32::from(state.i) + u32::from(vx) > 0xFFF);
    State {
        pc: state.pc + 0x2,
        i: state.i.wrapping_add(vx),
        v,
        ..*state
    }
}

/// I = sprite_sheet + Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: SPRITE_SHEET_START + u16::from(state.v[x as usize]) * SPRITE_HEIGHT,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(x: u8, state: &State) -> Result<State> {
    let value = state.v[x as usize];
    let bcd = [value / 100 % 10, value / 10 % 10, value % 10];
    let mut next = *state;
    next.write(state.i as usize, bcd.len())?
        .copy_from_slice(&bcd);
    next.pc += 0x2;
    Ok(next)
}

/// mem[I..=I+x] = V0..=Vx
/// Fill memory starting at address i with V0..=Vx, then bump i past them if `increment`
pub fn stor(x: u8, increment: bool, state: &State) -> Result<State> {
    let count = x as usize + 1;
    let mut next = *state;
    next.write(state.i as usize, count)?
        .copy_from_slice(&state.v[..count]);
    if increment {
        next.i = state.i.wrapping_add(count as u16);
    }
    next.pc += 0x2;
    Ok(next)
}

/// V0..=Vx = mem[I..=I+x]
/// Fill V0..=Vx with memory starting at address i, then bump i past them if `increment`
pub fn read(x: u8, increment: bool, state: &State) -> Result<State> {
    let count = x as usize + 1;
    let mut v = state.v;
    v[..count].copy_from_slice(state.read(state.i as usize, count)?);
    let i = if increment {
        state.i.wrapping_add(count as u16)
    } else {
        state.i
    };
    Ok(State {
        pc: state.pc + 0x2,
        v,
        i,
        ..*state
    })
}

/// I = sprite for the character Vx of the COSMAC ELF table; V0 = its width
///
/// Each character is 3 bytes `ab cd ef` at 0x100 + Vx * 3. The nibbles
/// `f d c b a` index a 16 byte row table at 0xF0 and the resolved rows are
/// assembled at 0x1C0. The remaining nibble `e` is the symbol width.
pub fn ldelf(x: u8, state: &State) -> Result<State> {
    let character = ELF_CHARACTER_TABLE as usize + state.v[x as usize] as usize * 3;
    let encoded = state.read(character, 3)?;
    let (ab, cd, ef) = (encoded[0], encoded[1], encoded[2]);
    let rows = state.read(ELF_GLYPH_TABLE as usize, 16)?;

    let nibbles = [ef & 0xF, cd >> 4, cd & 0xF, ab >> 4, ab & 0xF];
    let mut sprite = [0; 5];
    for (row, nibble) in sprite.iter_mut().zip(nibbles.iter()) {
        *row = rows[*nibble as usize];
    }

    let mut next = *state;
    next.write(ELF_SPRITE_SCRATCH as usize, sprite.len())?
        .copy_from_slice(&sprite);
    next.v[0x0] = ef >> 4;
    next.i = ELF_SPRITE_SCRATCH;
    next.pc += 0x2;
    Ok(next)
}
